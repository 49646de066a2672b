//! Language resolver: decides which language is active.
//!
//! At construction the resolver walks the persistence tiers (durable →
//! session → memory) and takes the first stored value that names a supported
//! language, falling back to the configured default. Afterwards the active
//! language lives in memory and reading it never touches storage.
//!
//! Every transition (set, resolve, forget) updates the tiers and the
//! in-memory value under one lock, so concurrent callers cannot leave the
//! persisted preference naming a different language than the active one.
//! Events are published after the lock is released.

use crate::i18n::{
    ChangeBus, I18nError, I18nEvent, I18nMetrics, Language, PersistenceChain, Tier, WriteOutcome,
};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::{debug, info, warn};

/// Owns the active language and its persisted preference.
#[derive(Debug)]
pub struct LanguageResolver {
    chain: PersistenceChain,
    preference_key: String,
    default: Language,
    current: RwLock<Language>,
    transition: Mutex<()>,
    bus: Arc<ChangeBus>,
    metrics: Arc<I18nMetrics>,
}

impl LanguageResolver {
    /// Create a resolver and run the initial resolution.
    ///
    /// No event is published for the initial value: nothing can have
    /// subscribed yet.
    pub fn new(
        chain: PersistenceChain,
        preference_key: impl Into<String>,
        default: Language,
        bus: Arc<ChangeBus>,
        metrics: Arc<I18nMetrics>,
    ) -> Self {
        let preference_key = preference_key.into();
        let (initial, tier) = read_preference(&chain, &preference_key, default);
        match tier {
            Some(tier) => info!("Resolved language {} from {} storage", initial, tier),
            None => info!("No stored language preference, using default {}", initial),
        }

        Self {
            chain,
            preference_key,
            default,
            current: RwLock::new(initial),
            transition: Mutex::new(()),
            bus,
            metrics,
        }
    }

    /// The active language. Never fails and never reads storage.
    pub fn current(&self) -> Language {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// The hard default used when every tier misses.
    pub fn default_language(&self) -> Language {
        self.default
    }

    /// Key the preference is stored under in every tier.
    pub fn preference_key(&self) -> &str {
        &self.preference_key
    }

    /// The underlying tiers.
    pub fn chain(&self) -> &PersistenceChain {
        &self.chain
    }

    /// Validate `code` and switch to it.
    ///
    /// An unsupported code is rejected with [`I18nError::InvalidLanguage`]
    /// and nothing changes.
    pub fn set_language(&self, code: &str) -> Result<Language, I18nError> {
        let language = Language::from_code(code).map_err(|e| {
            warn!("Rejected language change to '{}'", code);
            e
        })?;
        self.set(language);
        Ok(language)
    }

    /// Switch to `language`: write through every tier, update the in-memory
    /// value, then publish `LanguageChanged`.
    ///
    /// Re-selecting the active language still refreshes the tiers and
    /// publishes, so consumers can force a re-render.
    pub fn set(&self, language: Language) -> WriteOutcome {
        let (outcome, previous) = {
            let _transition = self.lock_transition();
            let outcome = self.chain.write(&self.preference_key, language.code());
            (outcome, self.replace_current(language))
        };
        if !outcome.is_complete() {
            debug!(
                "Language preference persisted to {:?}, failed for {:?}",
                outcome.acknowledged, outcome.failed
            );
        }

        self.metrics.record_language_change();
        info!("Language changed from {} to {}", previous, language);

        self.bus.publish(&I18nEvent::LanguageChanged { language });
        outcome
    }

    /// Re-read the tiers and adopt whatever they now hold.
    ///
    /// Publishes `LanguageChanged` only if the active language moved.
    pub fn resolve(&self) -> Language {
        let (resolved, previous) = {
            let _transition = self.lock_transition();
            let (resolved, _) = read_preference(&self.chain, &self.preference_key, self.default);
            (resolved, self.replace_current(resolved))
        };
        if previous != resolved {
            info!("Re-resolved language from {} to {}", previous, resolved);
            self.bus
                .publish(&I18nEvent::LanguageChanged { language: resolved });
        }
        resolved
    }

    /// Remove the stored preference from every tier and fall back to the
    /// default.
    pub fn forget(&self) -> WriteOutcome {
        let (outcome, previous) = {
            let _transition = self.lock_transition();
            let outcome = self.chain.clear(&self.preference_key);
            (outcome, self.replace_current(self.default))
        };
        info!("Cleared stored language preference");
        if previous != self.default {
            self.bus.publish(&I18nEvent::LanguageChanged {
                language: self.default,
            });
        }
        outcome
    }

    /// End the session-scoped tiers. The active language is untouched.
    pub fn end_session(&self) -> WriteOutcome {
        let _transition = self.lock_transition();
        self.chain.end_session()
    }

    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn replace_current(&self, language: Language) -> Language {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *current, language)
    }
}

/// First supported language stored in the chain, or `default`.
fn read_preference(
    chain: &PersistenceChain,
    key: &str,
    default: Language,
) -> (Language, Option<Tier>) {
    let found = chain.read_first(key, |value| match Language::from_code(value) {
        Ok(language) => Some(language),
        Err(_) => {
            warn!("Ignoring stored language '{}' under '{}'", value, key);
            None
        }
    });

    match found {
        Some((language, tier)) => (language, Some(tier)),
        None => (default, None),
    }
}

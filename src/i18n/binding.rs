//! Reactive binding: the handle a UI component holds.
//!
//! A binding registers one listener for `LanguageChanged` and one for
//! `CatalogUpdated`. Either event flips the binding's dirty flag and runs the
//! optional re-render callback, so content edited out of band shows up
//! without a reload. Reads always go to the resolver and store directly;
//! the binding caches nothing but the flag.
//!
//! Both listeners are removed on [`Binding::unsubscribe`] or on drop. The bus
//! outlives any single component, so a leaked listener would keep firing.

use crate::i18n::{
    CatalogStore, ChangeBus, EventKind, I18nError, I18nEvent, Language, LanguageResolver,
    ListenerId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Re-render hook invoked after the dirty flag is set.
pub type OnChange = Arc<dyn Fn(&I18nEvent) -> anyhow::Result<()> + Send + Sync>;

#[must_use = "dropping a Binding unsubscribes it"]
pub struct Binding {
    resolver: Arc<LanguageResolver>,
    store: Arc<CatalogStore>,
    bus: Arc<ChangeBus>,
    listeners: Vec<ListenerId>,
    dirty: Arc<AtomicBool>,
}

impl Binding {
    pub(crate) fn new(
        resolver: Arc<LanguageResolver>,
        store: Arc<CatalogStore>,
        bus: Arc<ChangeBus>,
        on_change: Option<OnChange>,
    ) -> Self {
        let dirty = Arc::new(AtomicBool::new(false));

        let listeners = [EventKind::LanguageChanged, EventKind::CatalogUpdated]
            .into_iter()
            .map(|kind| {
                let dirty = dirty.clone();
                let on_change = on_change.clone();
                bus.subscribe(kind, move |event| {
                    dirty.store(true, Ordering::SeqCst);
                    match &on_change {
                        Some(callback) => callback(event),
                        None => Ok(()),
                    }
                })
            })
            .collect();

        Self {
            resolver,
            store,
            bus,
            listeners,
            dirty,
        }
    }

    /// The active language, read fresh.
    pub fn current_language(&self) -> Language {
        self.resolver.current()
    }

    /// Translate `key` in the active language.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.store.lookup(self.resolver.current(), key, params)
    }

    /// Forward to the resolver; persistence happens there.
    pub fn change_language(&self, code: &str) -> Result<Language, I18nError> {
        self.resolver.set_language(code)
    }

    /// Whether an event arrived since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    pub fn is_subscribed(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Remove both listeners from the bus. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for id in self.listeners.drain(..) {
            self.bus.unsubscribe(id);
        }
        debug!("Binding unsubscribed");
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("listeners", &self.listeners)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

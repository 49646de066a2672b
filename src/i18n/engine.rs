//! The `I18n` facade: one owned instance wiring tiers, resolver, catalog
//! store and bus together. UI code receives a clone of it instead of
//! reaching for globals.

use crate::config::I18nConfig;
use crate::i18n::{
    Binding, Catalog, CatalogStore, ChangeBus, I18nError, I18nEvent, I18nMetrics, Language,
    LanguageConfig, LanguageRegistry, LanguageResolver, MetricsReport, OnChange, PersistenceChain,
    WriteOutcome,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Cheap to clone; every clone shares the same state.
#[derive(Clone, Debug)]
pub struct I18n {
    resolver: Arc<LanguageResolver>,
    store: Arc<CatalogStore>,
    bus: Arc<ChangeBus>,
    metrics: Arc<I18nMetrics>,
}

impl I18n {
    /// Initialize with the standard durable → session → memory tiers and the
    /// bundled baseline catalogs.
    pub fn init(config: &I18nConfig) -> Result<Self, I18nError> {
        let chain = PersistenceChain::standard(
            config.durable_path(),
            &config.session_dir,
            &config.session_id,
        );
        Self::with_stores(config, chain)
    }

    /// Initialize over caller-supplied tiers.
    pub fn with_stores(config: &I18nConfig, chain: PersistenceChain) -> Result<Self, I18nError> {
        let metrics = Arc::new(I18nMetrics::new());
        let bus = Arc::new(ChangeBus::new(metrics.clone()));
        let store = CatalogStore::bundled(bus.clone(), metrics.clone())?
            .with_allow_unknown_keys(config.allow_unknown_override_keys);
        Ok(Self::assemble(config, chain, store, bus, metrics))
    }

    /// Initialize over caller-supplied tiers and baseline catalogs.
    pub fn with_baseline(
        config: &I18nConfig,
        chain: PersistenceChain,
        baseline: HashMap<Language, Catalog>,
    ) -> Self {
        let metrics = Arc::new(I18nMetrics::new());
        let bus = Arc::new(ChangeBus::new(metrics.clone()));
        let store = CatalogStore::new(baseline, bus.clone(), metrics.clone())
            .with_allow_unknown_keys(config.allow_unknown_override_keys);
        Self::assemble(config, chain, store, bus, metrics)
    }

    fn assemble(
        config: &I18nConfig,
        chain: PersistenceChain,
        store: CatalogStore,
        bus: Arc<ChangeBus>,
        metrics: Arc<I18nMetrics>,
    ) -> Self {
        let chain = chain.with_metrics(metrics.clone());
        let resolver = LanguageResolver::new(
            chain,
            config.preference_key.clone(),
            config.default_language,
            bus.clone(),
            metrics.clone(),
        );
        info!(
            "i18n initialized: language {}, {:?}",
            resolver.current(),
            resolver.chain()
        );

        Self {
            resolver: Arc::new(resolver),
            store: Arc::new(store),
            bus,
            metrics,
        }
    }

    // ==================== Language ====================

    /// The active language. Never fails.
    pub fn current_language(&self) -> Language {
        self.resolver.current()
    }

    /// Switch language; unsupported codes are rejected and change nothing.
    pub fn set_language(&self, code: &str) -> Result<Language, I18nError> {
        self.resolver.set_language(code)
    }

    /// Re-read the persistence tiers.
    pub fn resolve_language(&self) -> Language {
        self.resolver.resolve()
    }

    /// Clear the stored preference and return to the default language.
    pub fn forget_preference(&self) -> WriteOutcome {
        self.resolver.forget()
    }

    /// End the session: session-scoped tiers drop the stored preference.
    /// The active language and the durable tier are untouched.
    pub fn end_session(&self) -> WriteOutcome {
        self.resolver.end_session()
    }

    /// Languages a picker should offer.
    pub fn available_languages(&self) -> Vec<&'static LanguageConfig> {
        LanguageRegistry::get().list_enabled()
    }

    // ==================== Translation ====================

    /// Translate `key` in the active language.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.store.lookup(self.resolver.current(), key, params)
    }

    /// Translate `key` in an explicit language.
    pub fn lookup(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String {
        self.store.lookup(language, key, params)
    }

    // ==================== Overrides ====================

    pub fn merge_override(&self, language: Language, partial: Catalog) -> usize {
        self.store.merge_override(language, partial)
    }

    pub fn merge_override_json(&self, language: Language, json: &str) -> Result<usize, I18nError> {
        self.store.merge_override_json(language, json)
    }

    pub fn load_override_document(&self, json: &str) -> Result<usize, I18nError> {
        self.store.load_override_document(json)
    }

    pub fn replace_override(&self, language: Language, catalog: Catalog) {
        self.store.replace_override(language, catalog)
    }

    pub fn reset_override(&self, language: Option<Language>) {
        self.store.reset_override(language)
    }

    // ==================== Bindings ====================

    /// A binding that only tracks its dirty flag.
    pub fn subscribe(&self) -> Binding {
        Binding::new(
            self.resolver.clone(),
            self.store.clone(),
            self.bus.clone(),
            None,
        )
    }

    /// A binding that also calls `on_change` after every relevant event.
    pub fn subscribe_with<F>(&self, on_change: F) -> Binding
    where
        F: Fn(&I18nEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let on_change: OnChange = Arc::new(on_change);
        Binding::new(
            self.resolver.clone(),
            self.store.clone(),
            self.bus.clone(),
            Some(on_change),
        )
    }

    // ==================== Components ====================

    pub fn bus(&self) -> &Arc<ChangeBus> {
        &self.bus
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn resolver(&self) -> &Arc<LanguageResolver> {
        &self.resolver
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }
}

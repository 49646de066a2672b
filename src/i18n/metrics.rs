//! Translation metrics and observability.
//!
//! Counts lookups, missing translations, and the failures the core absorbs
//! (storage tiers, listeners). Each [`I18n`](crate::i18n::I18n) instance owns
//! one `I18nMetrics`, shared by `Arc` with its components.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one i18n instance.
#[derive(Debug, Default)]
pub struct I18nMetrics {
    /// Lookups answered by an admin override
    override_hits: AtomicUsize,

    /// Lookups answered by the shipped baseline
    baseline_hits: AtomicUsize,

    /// Lookups that fell back to rendering the key
    missing_translations: AtomicUsize,

    /// Persistence tier calls that failed
    storage_failures: AtomicUsize,

    /// Bus listeners that returned an error or panicked
    listener_failures: AtomicUsize,

    /// Successful language changes
    language_changes: AtomicUsize,

    /// Catalog mutations (merge, replace, reset)
    catalog_updates: AtomicUsize,
}

impl I18nMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_override_hit(&self) {
        self.override_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_baseline_hit(&self) {
        self.baseline_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_translation(&self) {
        self.missing_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_listener_failure(&self) {
        self.listener_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_change(&self) {
        self.language_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_update(&self) {
        self.catalog_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn override_hits(&self) -> usize {
        self.override_hits.load(Ordering::Relaxed)
    }

    pub fn baseline_hits(&self) -> usize {
        self.baseline_hits.load(Ordering::Relaxed)
    }

    pub fn missing_translations(&self) -> usize {
        self.missing_translations.load(Ordering::Relaxed)
    }

    pub fn storage_failures(&self) -> usize {
        self.storage_failures.load(Ordering::Relaxed)
    }

    pub fn listener_failures(&self) -> usize {
        self.listener_failures.load(Ordering::Relaxed)
    }

    pub fn language_changes(&self) -> usize {
        self.language_changes.load(Ordering::Relaxed)
    }

    pub fn catalog_updates(&self) -> usize {
        self.catalog_updates.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let override_hits = self.override_hits();
        let baseline_hits = self.baseline_hits();
        let missing = self.missing_translations();
        let total_lookups = override_hits + baseline_hits + missing;
        let missing_rate = if total_lookups > 0 {
            (missing as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            total_lookups,
            override_hits,
            baseline_hits,
            missing_translations: missing,
            missing_rate,
            storage_failures: self.storage_failures(),
            listener_failures: self.listener_failures(),
            language_changes: self.language_changes(),
            catalog_updates: self.catalog_updates(),
        }
    }
}

/// Point-in-time snapshot of [`I18nMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub total_lookups: usize,
    pub override_hits: usize,
    pub baseline_hits: usize,
    pub missing_translations: usize,

    /// Missing translations as a percentage of lookups (0-100)
    pub missing_rate: f64,

    pub storage_failures: usize,
    pub listener_failures: usize,
    pub language_changes: usize,
    pub catalog_updates: usize,
}

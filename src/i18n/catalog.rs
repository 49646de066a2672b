//! Translation catalog store: shipped baseline plus admin overrides.
//!
//! # Invariants
//!
//! 1. **Key-level precedence**: a lookup consults the override for that exact
//!    key first, then the baseline. Overrides never hide baseline keys they
//!    do not mention.
//! 2. **Idempotent merge**: merging the same partial catalog twice leaves the
//!    same state as merging it once.
//! 3. **Atomic mutation**: every mutation is applied under one write lock, so
//!    readers see either the old or the new catalog, never an empty or
//!    half-merged one.
//! 4. **Total lookup**: a lookup always returns a string. A missing key comes
//!    back as the key itself so gaps stay visible in QA.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key in neither override nor baseline | Returns the key |
//! | Missing param | `{name}` with no `name` argument | Token left as-is |
//! | Bad override JSON | Admin document malformed | `I18nError`, catalog unchanged |
//! | Unknown override key | Key absent from baseline | Kept, or skipped when configured |

use crate::i18n::{ChangeBus, I18nError, I18nEvent, I18nMetrics, Language};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Key → string mapping for one language.
pub type Catalog = BTreeMap<String, String>;

const BUNDLED_KO: &str = include_str!("../../locales/ko.json");
const BUNDLED_EN: &str = include_str!("../../locales/en.json");

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder pattern is valid")
    })
}

// ==================== Interpolation ====================

/// Substitute `{name}` tokens from `params` in a single pass.
///
/// Unknown names, empty braces and unterminated `{` are copied verbatim.
/// Substituted values are not scanned again.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder names used by a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

// ==================== JSON flattening ====================

/// Flatten a nested JSON object into dotted keys.
///
/// `{"nav": {"support": {"main": "Support"}}}` becomes
/// `nav.support.main = "Support"`. Numbers and booleans are stringified,
/// array elements are indexed (`items.0`), and `null` leaves are skipped.
pub fn flatten_json(value: &Value) -> Result<Catalog, I18nError> {
    match value {
        Value::Object(_) => {
            let mut catalog = Catalog::new();
            flatten_into(&mut catalog, String::new(), value);
            Ok(catalog)
        }
        other => Err(I18nError::InvalidOverride(format!(
            "expected a JSON object, found {}",
            json_type_name(other)
        ))),
    }
}

fn flatten_into(catalog: &mut Catalog, prefix: String, value: &Value) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(catalog, join(key), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(catalog, join(&index.to_string()), child);
            }
        }
        Value::String(s) => {
            catalog.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            catalog.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            catalog.insert(prefix, b.to_string());
        }
        Value::Null => {}
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a nested JSON catalog document for one language.
pub fn parse_catalog(json: &str) -> Result<Catalog, I18nError> {
    let value: Value = serde_json::from_str(json)?;
    flatten_json(&value)
}

// ==================== Store ====================

#[derive(Debug, Default)]
struct OverrideState {
    entries: HashMap<Language, Catalog>,
    revision: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl OverrideState {
    fn touch(&mut self) {
        self.revision += 1;
        self.last_updated = Some(Utc::now());
    }
}

/// Baseline + override catalogs for every supported language.
pub struct CatalogStore {
    baseline: HashMap<Language, Catalog>,
    overrides: RwLock<OverrideState>,
    allow_unknown_keys: bool,
    bus: Arc<ChangeBus>,
    metrics: Arc<I18nMetrics>,
}

impl CatalogStore {
    /// A store over an explicit baseline.
    pub fn new(
        baseline: HashMap<Language, Catalog>,
        bus: Arc<ChangeBus>,
        metrics: Arc<I18nMetrics>,
    ) -> Self {
        Self {
            baseline,
            overrides: RwLock::new(OverrideState::default()),
            allow_unknown_keys: true,
            bus,
            metrics,
        }
    }

    /// A store over the catalogs bundled under `locales/`.
    pub fn bundled(bus: Arc<ChangeBus>, metrics: Arc<I18nMetrics>) -> Result<Self, I18nError> {
        Ok(Self::new(bundled_baseline()?, bus, metrics))
    }

    /// Skip override keys that the baseline does not define.
    pub fn with_allow_unknown_keys(mut self, allow: bool) -> Self {
        self.allow_unknown_keys = allow;
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, OverrideState> {
        self.overrides.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, OverrideState> {
        self.overrides.write().unwrap_or_else(|e| e.into_inner())
    }

    // ==================== Reads ====================

    /// Resolve `key` for `language` and substitute `params`.
    ///
    /// Never fails: a key missing from both catalogs is returned as-is.
    pub fn lookup(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String {
        if let Some(template) = self.resolve(language, key) {
            return interpolate(&template, params);
        }

        debug!("Missing translation for '{}' in {}", key, language);
        self.metrics.record_missing_translation();
        key.to_string()
    }

    fn resolve(&self, language: Language, key: &str) -> Option<String> {
        let state = self.read_state();
        if let Some(value) = state.entries.get(&language).and_then(|c| c.get(key)) {
            self.metrics.record_override_hit();
            return Some(value.clone());
        }
        drop(state);

        let value = self.baseline.get(&language).and_then(|c| c.get(key))?;
        self.metrics.record_baseline_hit();
        Some(value.clone())
    }

    /// Whether either catalog defines `key` for `language`.
    pub fn has_key(&self, language: Language, key: &str) -> bool {
        self.read_state()
            .entries
            .get(&language)
            .is_some_and(|c| c.contains_key(key))
            || self.is_baseline_key(language, key)
    }

    fn is_baseline_key(&self, language: Language, key: &str) -> bool {
        self.baseline
            .get(&language)
            .is_some_and(|c| c.contains_key(key))
    }

    /// Shipped strings for `language` (empty if none were bundled).
    pub fn baseline(&self, language: Language) -> Catalog {
        self.baseline.get(&language).cloned().unwrap_or_default()
    }

    /// Current overrides for `language`.
    pub fn overrides(&self, language: Language) -> Catalog {
        self.read_state()
            .entries
            .get(&language)
            .cloned()
            .unwrap_or_default()
    }

    /// Baseline with overrides applied key by key.
    pub fn effective_catalog(&self, language: Language) -> Catalog {
        let mut catalog = self.baseline(language);
        if let Some(overrides) = self.read_state().entries.get(&language) {
            catalog.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        catalog
    }

    pub fn override_count(&self, language: Language) -> usize {
        self.read_state()
            .entries
            .get(&language)
            .map_or(0, |c| c.len())
    }

    /// Bumped on every mutation that changed the override set.
    pub fn revision(&self) -> u64 {
        self.read_state().revision
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.read_state().last_updated
    }

    // ==================== Mutations ====================

    fn admit(&self, language: Language, partial: Catalog) -> Catalog {
        if self.allow_unknown_keys {
            return partial;
        }

        partial
            .into_iter()
            .filter(|(key, _)| {
                let known = self.is_baseline_key(language, key);
                if !known {
                    warn!("Skipping override for unknown key '{}' in {}", key, language);
                }
                known
            })
            .collect()
    }

    /// Union `partial` into the overrides for `language`.
    ///
    /// Keys in `partial` replace existing overrides; keys it does not name
    /// are left alone. Returns the number of keys whose value changed.
    pub fn merge_override(&self, language: Language, partial: Catalog) -> usize {
        let partial = self.admit(language, partial);

        let (changed, revision) = {
            let mut state = self.write_state();
            let entries = state.entries.entry(language).or_default();
            let mut changed = 0;
            for (key, value) in partial {
                if entries.get(&key) != Some(&value) {
                    entries.insert(key, value);
                    changed += 1;
                }
            }
            if changed > 0 {
                state.touch();
            }
            (changed, state.revision)
        };

        info!(
            "Merged override for {}: {} key(s) changed (revision {})",
            language, changed, revision
        );
        self.announce(Some(language), revision);
        changed
    }

    /// Replace every override for `language` with `catalog`.
    pub fn replace_override(&self, language: Language, catalog: Catalog) {
        let catalog = self.admit(language, catalog);
        let count = catalog.len();

        let revision = {
            let mut state = self.write_state();
            let changed = match state.entries.get(&language) {
                Some(previous) => *previous != catalog,
                None => !catalog.is_empty(),
            };
            state.entries.insert(language, catalog);
            if changed {
                state.touch();
            }
            state.revision
        };

        info!(
            "Replaced override for {} with {} key(s) (revision {})",
            language, count, revision
        );
        self.announce(Some(language), revision);
    }

    /// Drop overrides for one language, or for all when `None`.
    pub fn reset_override(&self, language: Option<Language>) {
        let revision = {
            let mut state = self.write_state();
            let removed = match language {
                Some(lang) => state.entries.remove(&lang).is_some_and(|c| !c.is_empty()),
                None => {
                    let any = state.entries.values().any(|c| !c.is_empty());
                    state.entries.clear();
                    any
                }
            };
            if removed {
                state.touch();
            }
            state.revision
        };

        match language {
            Some(lang) => info!("Reset override for {} (revision {})", lang, revision),
            None => info!("Reset all overrides (revision {})", revision),
        }
        self.announce(language, revision);
    }

    /// Parse a nested JSON catalog and merge it for `language`.
    pub fn merge_override_json(&self, language: Language, json: &str) -> Result<usize, I18nError> {
        let partial = parse_catalog(json)?;
        Ok(self.merge_override(language, partial))
    }

    /// Merge an admin document keyed by language code
    /// (`{"ko": {...}, "en": {...}}`) in one atomic step.
    ///
    /// Unsupported language codes are skipped with a warning. Returns the
    /// number of keys whose value changed.
    pub fn load_override_document(&self, json: &str) -> Result<usize, I18nError> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(by_language) = &document else {
            return Err(I18nError::InvalidOverride(format!(
                "expected an object keyed by language code, found {}",
                json_type_name(&document)
            )));
        };

        let mut incoming = Vec::new();
        for (code, value) in by_language {
            match Language::from_code(code) {
                Ok(language) => {
                    let partial = flatten_json(value)?;
                    incoming.push((language, self.admit(language, partial)));
                }
                Err(_) => warn!("Skipping override for unsupported language '{}'", code),
            }
        }

        let (changed, revision) = {
            let mut state = self.write_state();
            let mut changed = 0;
            for (language, partial) in incoming {
                let entries = state.entries.entry(language).or_default();
                for (key, value) in partial {
                    if entries.get(&key) != Some(&value) {
                        entries.insert(key, value);
                        changed += 1;
                    }
                }
            }
            if changed > 0 {
                state.touch();
            }
            (changed, state.revision)
        };

        info!(
            "Loaded override document: {} key(s) changed (revision {})",
            changed, revision
        );
        self.announce(None, revision);
        Ok(changed)
    }

    fn announce(&self, language: Option<Language>, revision: u64) {
        self.metrics.record_catalog_update();
        self.bus
            .publish(&I18nEvent::CatalogUpdated { language, revision });
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("languages", &self.baseline.keys().collect::<Vec<_>>())
            .field("revision", &self.revision())
            .finish()
    }
}

/// Parse the catalogs compiled into the binary.
pub fn bundled_baseline() -> Result<HashMap<Language, Catalog>, I18nError> {
    let mut baseline = HashMap::new();
    baseline.insert(Language::KOREAN, parse_catalog(BUNDLED_KO)?);
    baseline.insert(Language::ENGLISH, parse_catalog(BUNDLED_EN)?);
    Ok(baseline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::EventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn new_store() -> (CatalogStore, Arc<ChangeBus>) {
        let metrics = Arc::new(I18nMetrics::new());
        let bus = Arc::new(ChangeBus::new(metrics.clone()));
        let mut baseline = HashMap::new();
        baseline.insert(Language::KOREAN, catalog(&[("greet", "안녕"), ("a", "1")]));
        baseline.insert(
            Language::ENGLISH,
            catalog(&[("greet", "hello"), ("a", "1"), ("b", "2")]),
        );
        (CatalogStore::new(baseline, bus.clone(), metrics), bus)
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_interpolate_substitutes_params() {
        let out = interpolate("© {year} {company}", &[("year", "2024"), ("company", "Acme")]);
        assert_eq!(out, "© 2024 Acme");
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        let out = interpolate("{greeting}, {name}!", &[("name", "Kim")]);
        assert_eq!(out, "{greeting}, Kim!");
    }

    #[test]
    fn test_interpolate_without_params_is_verbatim() {
        assert_eq!(interpolate("Hi {name}", &[]), "Hi {name}");
    }

    #[test]
    fn test_interpolate_malformed_tokens() {
        let params = [("x", "1")];
        assert_eq!(interpolate("{} and {x", &params), "{} and {x");
        assert_eq!(interpolate("{{x}}", &params), "{1}");
    }

    #[test]
    fn test_interpolate_is_single_pass() {
        let out = interpolate("{a}", &[("a", "{b}"), ("b", "nope")]);
        assert_eq!(out, "{b}");
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(
            placeholders("{year} by {company}, {year}"),
            vec!["year", "company", "year"]
        );
    }

    // ==================== Flatten Tests ====================

    #[test]
    fn test_flatten_nested_object() {
        let value = serde_json::json!({
            "nav": { "support": { "main": "Support" }, "home": "Home" },
            "count": 3,
            "beta": true,
            "items": ["x", "y"],
            "gone": null
        });
        let flat = flatten_json(&value).unwrap();

        assert_eq!(flat["nav.support.main"], "Support");
        assert_eq!(flat["nav.home"], "Home");
        assert_eq!(flat["count"], "3");
        assert_eq!(flat["beta"], "true");
        assert_eq!(flat["items.1"], "y");
        assert!(!flat.contains_key("gone"));
    }

    #[test]
    fn test_flatten_rejects_non_object() {
        let err = flatten_json(&serde_json::json!(["a"])).unwrap_err();
        assert!(matches!(err, I18nError::InvalidOverride(msg) if msg.contains("array")));
    }

    #[test]
    fn test_bundled_baseline_parses() {
        let baseline = bundled_baseline().expect("bundled catalogs should parse");
        assert_eq!(baseline[&Language::KOREAN]["nav.support.main"], "고객지원");
        assert_eq!(baseline[&Language::ENGLISH]["nav.support.main"], "Support");
    }

    #[test]
    fn test_bundled_catalogs_have_same_keys() {
        let baseline = bundled_baseline().unwrap();
        let ko: Vec<_> = baseline[&Language::KOREAN].keys().collect();
        let en: Vec<_> = baseline[&Language::ENGLISH].keys().collect();
        assert_eq!(ko, en);
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_baseline() {
        let (store, _) = new_store();
        assert_eq!(store.lookup(Language::ENGLISH, "greet", &[]), "hello");
        assert_eq!(store.lookup(Language::KOREAN, "greet", &[]), "안녕");
    }

    #[test]
    fn test_lookup_missing_returns_key() {
        let (store, _) = new_store();
        assert_eq!(
            store.lookup(Language::ENGLISH, "nav.support.main", &[]),
            "nav.support.main"
        );
        assert_eq!(store.metrics.missing_translations(), 1);
    }

    #[test]
    fn test_lookup_missing_in_one_language_only() {
        let (store, _) = new_store();
        assert_eq!(store.lookup(Language::KOREAN, "b", &[]), "b");
        assert_eq!(store.lookup(Language::ENGLISH, "b", &[]), "2");
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_merge_is_non_destructive() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("b", "3")]));

        assert_eq!(store.lookup(Language::ENGLISH, "a", &[]), "1");
        assert_eq!(store.lookup(Language::ENGLISH, "b", &[]), "3");
        assert_eq!(store.lookup(Language::KOREAN, "a", &[]), "1");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (store, _) = new_store();
        let partial = catalog(&[("greet", "hi"), ("new.key", "fresh")]);

        assert_eq!(store.merge_override(Language::ENGLISH, partial.clone()), 2);
        let once = store.effective_catalog(Language::ENGLISH);
        let revision = store.revision();

        assert_eq!(store.merge_override(Language::ENGLISH, partial), 0);
        assert_eq!(store.effective_catalog(Language::ENGLISH), once);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_merge_unions_with_previous_override() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("a", "x")]));
        store.merge_override(Language::ENGLISH, catalog(&[("b", "y")]));

        assert_eq!(store.override_count(Language::ENGLISH), 2);
        assert_eq!(store.lookup(Language::ENGLISH, "a", &[]), "x");
        assert_eq!(store.lookup(Language::ENGLISH, "b", &[]), "y");
    }

    #[test]
    fn test_merge_publishes_catalog_updated() {
        let (store, bus) = new_store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        bus.subscribe(EventKind::CatalogUpdated, move |event| {
            assert!(matches!(
                event,
                I18nEvent::CatalogUpdated { language: Some(Language::ENGLISH), .. }
            ));
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noop_merge_publishes_without_revision_bump() {
        let (store, bus) = new_store();
        let revisions = Arc::new(std::sync::Mutex::new(Vec::new()));
        let slot = revisions.clone();
        bus.subscribe(EventKind::CatalogUpdated, move |event| {
            if let I18nEvent::CatalogUpdated { revision, .. } = event {
                slot.lock().unwrap().push(*revision);
            }
            Ok(())
        });

        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));
        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));

        assert_eq!(*revisions.lock().unwrap(), vec![1, 1]);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_listener_sees_merged_value() {
        let (store, bus) = new_store();
        let store = Arc::new(store);
        let seen = Arc::new(std::sync::Mutex::new(String::new()));

        let reader = store.clone();
        let slot = seen.clone();
        bus.subscribe(EventKind::CatalogUpdated, move |_| {
            *slot.lock().unwrap() = reader.lookup(Language::ENGLISH, "greet", &[]);
            Ok(())
        });

        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));
        assert_eq!(*seen.lock().unwrap(), "hi");
    }

    #[test]
    fn test_merge_rejects_unknown_keys_when_configured() {
        let (store, _) = new_store();
        let store = store.with_allow_unknown_keys(false);

        let changed = store.merge_override(
            Language::ENGLISH,
            catalog(&[("greet", "hi"), ("typo.key", "oops")]),
        );
        assert_eq!(changed, 1);
        assert!(!store.has_key(Language::ENGLISH, "typo.key"));
    }

    #[test]
    fn test_merge_override_json() {
        let (store, _) = new_store();
        let changed = store
            .merge_override_json(Language::ENGLISH, r#"{"nav": {"home": "Start"}}"#)
            .unwrap();

        assert_eq!(changed, 1);
        assert_eq!(store.lookup(Language::ENGLISH, "nav.home", &[]), "Start");
    }

    #[test]
    fn test_merge_override_json_malformed_leaves_catalog() {
        let (store, _) = new_store();
        let result = store.merge_override_json(Language::ENGLISH, "{not json");

        assert!(matches!(result, Err(I18nError::OverrideParse(_))));
        assert_eq!(store.override_count(Language::ENGLISH), 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_load_override_document() {
        let (store, _) = new_store();
        let document = r#"{
            "ko": {"greet": "반가워요"},
            "en": {"greet": "hi"},
            "fr": {"greet": "salut"}
        }"#;
        let changed = store.load_override_document(document).unwrap();

        assert_eq!(changed, 2);
        assert_eq!(store.lookup(Language::KOREAN, "greet", &[]), "반가워요");
        assert_eq!(store.lookup(Language::ENGLISH, "greet", &[]), "hi");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_load_override_document_rejects_non_object() {
        let (store, _) = new_store();
        assert!(matches!(
            store.load_override_document("[1, 2]"),
            Err(I18nError::InvalidOverride(_))
        ));
    }

    // ==================== Replace / Reset Tests ====================

    #[test]
    fn test_replace_override_is_wholesale() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("a", "x"), ("b", "y")]));
        store.replace_override(Language::ENGLISH, catalog(&[("greet", "yo")]));

        assert_eq!(store.lookup(Language::ENGLISH, "a", &[]), "1");
        assert_eq!(store.lookup(Language::ENGLISH, "b", &[]), "2");
        assert_eq!(store.lookup(Language::ENGLISH, "greet", &[]), "yo");
    }

    #[test]
    fn test_reset_override_single_language() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));
        store.merge_override(Language::KOREAN, catalog(&[("greet", "반가워요")]));

        store.reset_override(Some(Language::ENGLISH));

        assert_eq!(store.lookup(Language::ENGLISH, "greet", &[]), "hello");
        assert_eq!(store.lookup(Language::KOREAN, "greet", &[]), "반가워요");
    }

    #[test]
    fn test_reset_override_all() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("greet", "hi")]));
        store.merge_override(Language::KOREAN, catalog(&[("greet", "반가워요")]));

        store.reset_override(None);

        assert_eq!(store.lookup(Language::ENGLISH, "greet", &[]), "hello");
        assert_eq!(store.lookup(Language::KOREAN, "greet", &[]), "안녕");
        assert!(store.last_updated().is_some());
    }

    #[test]
    fn test_effective_catalog_overlays_baseline() {
        let (store, _) = new_store();
        store.merge_override(Language::ENGLISH, catalog(&[("b", "3"), ("c", "4")]));

        let effective = store.effective_catalog(Language::ENGLISH);
        assert_eq!(effective["a"], "1");
        assert_eq!(effective["b"], "3");
        assert_eq!(effective["c"], "4");
        assert_eq!(store.baseline(Language::ENGLISH)["b"], "2");
    }
}

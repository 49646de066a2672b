//! The languages the site ships with, as a compiled-in table.
//!
//! Nothing here is mutable. The active language and the override layer live
//! in the owned [`I18n`](crate::i18n::I18n) instance.

/// One row of the language table.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 code, stored lowercase
    pub code: &'static str,
    pub name: &'static str,
    /// Label shown in the language picker
    pub native_name: &'static str,
    /// Fallback when no tier holds a preference
    pub is_default: bool,
    pub enabled: bool,
}

const LANGUAGES: &[LanguageConfig] = &[
    LanguageConfig {
        code: "ko",
        name: "Korean",
        native_name: "한국어",
        is_default: true,
        enabled: true,
    },
    LanguageConfig {
        code: "en",
        name: "English",
        native_name: "English",
        is_default: false,
        enabled: true,
    },
];

const fn default_count(languages: &[LanguageConfig]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < languages.len() {
        if languages[i].is_default {
            count += 1;
        }
        i += 1;
    }
    count
}

const _: () = assert!(
    default_count(LANGUAGES) == 1,
    "exactly one language must be marked as the default"
);

pub struct LanguageRegistry {
    languages: &'static [LanguageConfig],
}

static REGISTRY: LanguageRegistry = LanguageRegistry {
    languages: LANGUAGES,
};

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        &REGISTRY
    }

    /// Look up a code, ignoring ASCII case and surrounding whitespace so a
    /// stored `"EN "` still matches.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        let code = code.trim();
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Languages a user may pick, in table order.
    pub fn list_enabled(&self) -> Vec<&'static LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    pub fn list_all(&self) -> Vec<&'static LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The table's default row. Uniqueness is checked at compile time.
    pub fn default_language(&self) -> &'static LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_default)
            .unwrap_or(&self.languages[0])
    }

    pub fn is_enabled(&self, code: &str) -> bool {
        matches!(self.get_by_code(code), Some(lang) if lang.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_row() {
        let ko = LanguageRegistry::get()
            .get_by_code("ko")
            .expect("Korean should be registered");

        assert_eq!(ko.name, "Korean");
        assert_eq!(ko.native_name, "한국어");
        assert!(ko.is_default);
        assert!(ko.enabled);
    }

    #[test]
    fn test_english_row() {
        let en = LanguageRegistry::get()
            .get_by_code("en")
            .expect("English should be registered");

        assert_eq!(en.native_name, "English");
        assert!(!en.is_default);
    }

    #[test]
    fn test_lookup_trims_and_ignores_case() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.get_by_code(" EN ").map(|c| c.code), Some("en"));
        assert_eq!(registry.get_by_code("Ko").map(|c| c.code), Some("ko"));
    }

    #[test]
    fn test_unknown_codes_miss() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("fr").is_none());
        assert!(registry.get_by_code("").is_none());
        assert!(!registry.is_enabled("ja"));
    }

    #[test]
    fn test_enabled_order_puts_default_first() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|c| c.code)
            .collect();

        assert_eq!(codes, vec!["ko", "en"]);
        assert_eq!(LanguageRegistry::get().list_all().len(), 2);
        assert_eq!(LanguageRegistry::get().default_language().code, "ko");
    }
}

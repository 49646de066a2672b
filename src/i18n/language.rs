//! Language type: a validated member of the supported set.
//!
//! A `Language` can only be built from a registry entry, so once resolution
//! completes the active language is never outside the supported set.

use crate::i18n::{I18nError, LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "ko", "en")
    code: &'static str,
}

impl Language {
    /// Korean, the site default.
    pub const KOREAN: Language = Language { code: "ko" };

    /// English.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err(I18nError::InvalidLanguage)` otherwise
    ///
    /// # Example
    /// ```ignore
    /// let english = Language::from_code("en")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            _ => Err(I18nError::InvalidLanguage(code.to_string())),
        }
    }

    /// The registry default, used when every persistence tier misses.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// All enabled languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (e.g., "Korean").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g., "한국어").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the registry default.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl std::str::FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_korean_constant() {
        let korean = Language::KOREAN;
        assert_eq!(korean.code(), "ko");
        assert_eq!(korean.name(), "Korean");
        assert!(korean.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_english() {
        let language = Language::from_code("en").expect("Should succeed");
        assert_eq!(language, Language::ENGLISH);
    }

    #[test]
    fn test_from_code_normalizes_case() {
        let language = Language::from_code("KO").expect("Should succeed");
        assert_eq!(language, Language::KOREAN);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(matches!(result, Err(I18nError::InvalidLanguage(code)) if code == "fr"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_parse_via_from_str() {
        let language: Language = "en".parse().expect("Should parse");
        assert_eq!(language, Language::ENGLISH);
        assert!("xx".parse::<Language>().is_err());
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_language_is_korean() {
        assert_eq!(Language::default_language(), Language::KOREAN);
    }

    #[test]
    fn test_all_languages() {
        assert_eq!(Language::all(), vec![Language::KOREAN, Language::ENGLISH]);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::ENGLISH.to_string(), "en");
    }

    #[test]
    fn test_serialize_as_code() {
        let json = serde_json::to_string(&Language::KOREAN).unwrap();
        assert_eq!(json, "\"ko\"");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Language::KOREAN.native_name(), "한국어");
        assert_eq!(Language::ENGLISH.native_name(), "English");
    }
}

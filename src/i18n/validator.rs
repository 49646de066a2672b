//! Override catalog validation.
//!
//! Admin-edited overrides are free text. These checks catch the mistakes
//! that silently break rendering: placeholders dropped or renamed during
//! editing, keys that do not exist in the shipped catalog (usually typos),
//! and blanked-out values.

use crate::i18n::catalog::{placeholders, Catalog};
use serde::Serialize;
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about an override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that will visibly break rendering
    pub errors: Vec<String>,

    /// Suspicious but renderable entries
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys present in one language's catalog but not the other's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub missing_in_left: Vec<String>,
    pub missing_in_right: Vec<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing_in_left.is_empty() && self.missing_in_right.is_empty()
    }
}

/// Validator for override catalogs.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Check `overrides` against the `baseline` it will be merged onto.
    ///
    /// - empty values are errors (they render as blank text)
    /// - keys unknown to the baseline are warnings
    /// - placeholder sets that differ from the baseline string are warnings
    pub fn validate_override(baseline: &Catalog, overrides: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, value) in overrides {
            if value.trim().is_empty() {
                report.errors.push(format!("Empty value for '{}'", key));
                continue;
            }

            let Some(original) = baseline.get(key) else {
                report
                    .warnings
                    .push(format!("Unknown key '{}' not in baseline", key));
                continue;
            };

            let expected: BTreeSet<String> = placeholders(original).into_iter().collect();
            let actual: BTreeSet<String> = placeholders(value).into_iter().collect();
            if expected != actual {
                report.warnings.push(format!(
                    "Placeholder mismatch for '{}': baseline has {:?}, override has {:?}",
                    key, expected, actual
                ));
            }
        }

        report
    }

    /// Compare the key sets of two languages' catalogs.
    pub fn coverage(left: &Catalog, right: &Catalog) -> CoverageReport {
        CoverageReport {
            missing_in_left: right
                .keys()
                .filter(|key| !left.contains_key(*key))
                .cloned()
                .collect(),
            missing_in_right: left
                .keys()
                .filter(|key| !right.contains_key(*key))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ==================== Override Validation Tests ====================

    #[test]
    fn test_validate_clean_override() {
        let baseline = catalog(&[("footer.copyright", "© {year} {company}")]);
        let overrides = catalog(&[("footer.copyright", "Copyright {year}, {company}")]);

        let report = CatalogValidator::validate_override(&baseline, &overrides);
        assert!(report.is_clean());
    }

    #[test]
    fn test_validate_dropped_placeholder() {
        let baseline = catalog(&[("about.founded", "Founded in {year}")]);
        let overrides = catalog(&[("about.founded", "Founded long ago")]);

        let report = CatalogValidator::validate_override(&baseline, &overrides);
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("Placeholder mismatch"));
    }

    #[test]
    fn test_validate_renamed_placeholder() {
        let baseline = catalog(&[("hero.subtitle", "{company} grows")]);
        let overrides = catalog(&[("hero.subtitle", "{firm} grows")]);

        let report = CatalogValidator::validate_override(&baseline, &overrides);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_validate_unknown_key() {
        let baseline = catalog(&[("nav.home", "Home")]);
        let overrides = catalog(&[("nav.hmoe", "Start")]);

        let report = CatalogValidator::validate_override(&baseline, &overrides);
        assert!(report.warnings[0].contains("Unknown key 'nav.hmoe'"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_validate_empty_value_is_error() {
        let baseline = catalog(&[("nav.home", "Home")]);
        let overrides = catalog(&[("nav.home", "   ")]);

        let report = CatalogValidator::validate_override(&baseline, &overrides);
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_validation_report_default_is_clean() {
        assert!(ValidationReport::default().is_clean());
    }

    // ==================== Coverage Tests ====================

    #[test]
    fn test_coverage_reports_both_sides() {
        let ko = catalog(&[("a", "가"), ("b", "나")]);
        let en = catalog(&[("b", "B"), ("c", "C")]);

        let coverage = CatalogValidator::coverage(&ko, &en);
        assert_eq!(coverage.missing_in_left, vec!["c"]);
        assert_eq!(coverage.missing_in_right, vec!["a"]);
        assert!(!coverage.is_complete());
    }

    #[test]
    fn test_coverage_complete() {
        let ko = catalog(&[("a", "가")]);
        let en = catalog(&[("a", "A")]);
        assert!(CatalogValidator::coverage(&ko, &en).is_complete());
    }
}

//! Error types for the i18n core.
//!
//! Only [`I18nError::InvalidLanguage`] reaches UI callers. Storage failures
//! are absorbed per tier, missing translations degrade to the key itself, and
//! listener failures are isolated inside the bus.

use crate::i18n::storage::Tier;
use thiserror::Error;

/// Caller-visible errors.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A language code outside the supported, enabled set.
    #[error("unsupported language code: '{0}'")]
    InvalidLanguage(String),

    /// An override document was not valid JSON.
    #[error("failed to parse override catalog: {0}")]
    OverrideParse(#[from] serde_json::Error),

    /// An override document was valid JSON but not a catalog.
    #[error("invalid override catalog: {0}")]
    InvalidOverride(String),
}

/// Failure of a single persistence tier.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused access (disabled, quota, private mode).
    #[error("{tier} storage unavailable: {reason}")]
    Unavailable { tier: Tier, reason: String },

    /// The backend failed while reading or writing.
    #[error("{tier} storage I/O failed: {source}")]
    Io {
        tier: Tier,
        #[source]
        source: std::io::Error,
    },

    /// The backend holds data that could not be decoded.
    #[error("{tier} storage is corrupt: {source}")]
    Corrupt {
        tier: Tier,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// The tier that produced this error.
    pub fn tier(&self) -> Tier {
        match self {
            StorageError::Unavailable { tier, .. }
            | StorageError::Io { tier, .. }
            | StorageError::Corrupt { tier, .. } => *tier,
        }
    }
}

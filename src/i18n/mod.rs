//! Internationalization (i18n) core: language preference resolution and a
//! reactive translation catalog.
//!
//! # Architecture
//!
//! - `registry`: the fixed set of supported languages and their metadata
//! - `language`: validated `Language` value type
//! - `storage`: persistence tiers (durable, session, memory) behind `KeyValueStore`
//! - `resolver`: picks the active language from the tiers and switches it
//! - `catalog`: baseline catalogs merged key by key with admin overrides
//! - `bus`: typed publish/subscribe channel for change notification
//! - `binding`: per-component subscription handle with a dirty flag
//! - `engine`: the `I18n` facade tying the pieces together
//! - `validator`: override quality checks
//! - `metrics`: lookup and failure counters
//!
//! # Example
//!
//! ```rust,ignore
//! use site_i18n::config::I18nConfig;
//! use site_i18n::i18n::I18n;
//!
//! let i18n = I18n::init(&I18nConfig::from_env()?)?;
//! let binding = i18n.subscribe();
//!
//! i18n.set_language("en")?;
//! assert!(binding.take_dirty());
//! println!("{}", binding.t("footer.copyright", &[("year", "2024"), ("company", "Acme")]));
//! ```

mod binding;
mod bus;
pub mod catalog;
mod engine;
mod error;
mod language;
mod metrics;
mod registry;
mod resolver;
pub mod storage;
mod validator;

pub use binding::{Binding, OnChange};
pub use bus::{ChangeBus, EventKind, I18nEvent, Listener, ListenerId};
pub use catalog::{Catalog, CatalogStore};
pub use engine::I18n;
pub use error::{I18nError, StorageError};
pub use language::Language;
pub use metrics::{I18nMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::LanguageResolver;
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, PersistenceChain, SessionStore, Tier, WriteOutcome,
};
pub use validator::{CatalogValidator, CoverageReport, ValidationReport};

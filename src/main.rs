//! Inspect the i18n state the site would start with.
//!
//! Usage:
//!   cargo run                 # Resolve the stored language and print samples
//!   cargo run -- en           # Switch to English first (persists the choice)
//!
//! Optional environment variables:
//! - I18N_DEFAULT_LANGUAGE (defaults to ko)
//! - I18N_PREFERENCE_KEY (defaults to preferredLanguage)
//! - I18N_DATA_DIR (defaults to data)
//! - I18N_SESSION_DIR / I18N_SESSION_ID (a fresh per-process session unless set)
//! - I18N_OVERRIDES_FILE (admin override document keyed by language code)

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use site_i18n::config::I18nConfig;
use site_i18n::i18n::{CatalogValidator, I18n, Language};
use tracing::{info, warn};

const SAMPLE_KEYS: &[&str] = &[
    "common.greet",
    "nav.support.main",
    "hero.title",
    "footer.copyright",
];

fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_i18n=info".parse()?),
        )
        .init();

    let config = I18nConfig::from_env()?;
    let i18n = I18n::init(&config).context("Failed to initialize i18n")?;

    if let Some(path) = &config.overrides_file {
        let document = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {}", path.display()))?;
        let changed = i18n
            .load_override_document(&document)
            .with_context(|| format!("Invalid overrides file {}", path.display()))?;
        info!("Applied {} override(s) from {}", changed, path.display());

        for language in Language::all() {
            let report = CatalogValidator::validate_override(
                &i18n.store().baseline(language),
                &i18n.store().overrides(language),
            );
            for warning in &report.warnings {
                warn!("[{}] {}", language, warning);
            }
            for error in &report.errors {
                warn!("[{}] {}", language, error);
            }
        }
    }

    if let Some(code) = std::env::args().nth(1) {
        i18n.set_language(&code)?;
    }

    let language = i18n.current_language();
    println!("Language: {} ({})", language.native_name(), language);
    println!(
        "Available: {}",
        i18n.available_languages()
            .iter()
            .map(|l| l.code)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let year = Utc::now().year().to_string();
    let params = [("year", year.as_str()), ("company", "Acme")];
    for key in SAMPLE_KEYS {
        println!("  {} = {}", key, i18n.t(key, &params));
    }

    println!("{}", serde_json::to_string_pretty(&i18n.metrics())?);

    if !config.shared_session {
        i18n.end_session();
    }
    Ok(())
}

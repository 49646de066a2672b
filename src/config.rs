use crate::i18n::Language;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct I18nConfig {
    // Language
    pub default_language: Language,
    pub preference_key: String,

    // Persistence tiers
    pub data_dir: PathBuf,
    pub session_dir: PathBuf,
    pub session_id: String,
    /// Set when `I18N_SESSION_ID` names a session other processes may join.
    /// A generated id is private to this process and its file is removed
    /// when the session ends.
    pub shared_session: bool,

    // Overrides
    pub allow_unknown_override_keys: bool,
    pub overrides_file: Option<PathBuf>,
}

impl I18nConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_language = match var("I18N_DEFAULT_LANGUAGE") {
            Some(code) => Language::from_code(&code)
                .with_context(|| format!("I18N_DEFAULT_LANGUAGE is not supported: '{}'", code))?,
            None => Language::default_language(),
        };

        let allow_unknown_override_keys = match var("I18N_ALLOW_UNKNOWN_OVERRIDE_KEYS") {
            Some(value) => parse_bool(&value).with_context(|| {
                format!("I18N_ALLOW_UNKNOWN_OVERRIDE_KEYS is not a boolean: '{}'", value)
            })?,
            None => true,
        };

        Ok(Self {
            default_language,
            preference_key: var("I18N_PREFERENCE_KEY")
                .unwrap_or_else(|| "preferredLanguage".to_string()),

            data_dir: var("I18N_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            session_dir: var("I18N_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            shared_session: var("I18N_SESSION_ID").is_some(),
            session_id: var("I18N_SESSION_ID").unwrap_or_else(process_session_id),

            allow_unknown_override_keys,
            overrides_file: var("I18N_OVERRIDES_FILE").map(PathBuf::from),
        })
    }

    /// Path of the durable tier's file.
    pub fn durable_path(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default_language(),
            preference_key: "preferredLanguage".to_string(),
            data_dir: PathBuf::from("data"),
            session_dir: std::env::temp_dir(),
            session_id: process_session_id(),
            shared_session: false,
            allow_unknown_override_keys: true,
            overrides_file: None,
        }
    }
}

/// A session id unique to this process: pid plus start time in milliseconds.
fn process_session_id() -> String {
    format!("{}-{}", std::process::id(), Utc::now().timestamp_millis())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Global settings for dot0n.
//!
//! Settings live in the `settings` object of `~/.0n/config.json`, itself a
//! `config` document. Parsing is forward compatible: unknown fields are
//! ignored and missing fields take their defaults.

use crate::document::ENVELOPE_KEY;
use crate::error::Result;
use crate::fs::read_to_string;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;


/// User-level settings stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AI provider used for natural-language features.
    pub ai_provider: String,

    /// Matching strategy when the AI provider is unavailable.
    pub fallback_mode: String,

    /// Whether execution history is recorded under `history/`.
    pub history_enabled: bool,

    /// Whether responses are cached under `cache/`.
    pub cache_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_provider: "anthropic".to_string(),
            fallback_mode: "keyword".to_string(),
            history_enabled: true,
            cache_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from a `config.json` file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using default settings");
            return Ok(Self::default());
        }

        let content = read_to_string(path)?;
        let document: Value = serde_json::from_str(&content)?;
        if !Self::is_config_document(&document) {
            tracing::warn!(path = %path.display(), "settings file is not a config document");
        }
        Ok(Self::from_document(&document))
    }

    /// Extract settings from a config document.
    ///
    /// Fields with the wrong type fall back to their defaults individually.
    pub fn from_document(document: &Value) -> Self {
        let Some(settings) = document.get("settings").and_then(Value::as_object) else {
            return Self::default();
        };

        let defaults = Self::default();
        let text = |key: &str, default: String| {
            settings
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(default)
        };
        let flag = |key: &str, default: bool| settings.get(key).and_then(Value::as_bool).unwrap_or(default);

        Self {
            ai_provider: text("ai_provider", defaults.ai_provider),
            fallback_mode: text("fallback_mode", defaults.fallback_mode),
            history_enabled: flag("history_enabled", defaults.history_enabled),
            cache_enabled: flag("cache_enabled", defaults.cache_enabled),
        }
    }

    /// Whether `document` looks like a config document at all.
    pub fn is_config_document(document: &Value) -> bool {
        document
            .get(ENVELOPE_KEY)
            .and_then(|envelope| envelope.get("type"))
            .and_then(Value::as_str)
            == Some("config")
    }
}

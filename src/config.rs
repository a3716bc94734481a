use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

pub const ERRORS_PREFIX_KEY: &str = "filter.errors.prefix";
pub const WARNINGS_PREFIX_KEY: &str = "filter.warnings.prefix";
pub const INFOS_PREFIX_KEY: &str = "filter.infos.prefix";
pub const PLACEHOLDER_KEY: &str = "filter.placeholder";
pub const TOOLTIP_KEY: &str = "filter.action.tooltip";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read messages file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse messages file '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Message '{0}' must not be empty")]
    EmptyKeyword(String),
}

/// Localized strings keyed by logical message key.
///
/// Lookups fall back to the built-in English bundle, so a partial
/// translation only needs to list the keys it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| default_messages().entries.get(key))
            .map(String::as_str)
    }

    /// Like [`Messages::get`], but falls back to the key itself for unknown keys.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }
}

impl From<HashMap<String, String>> for Messages {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

pub fn default_messages() -> &'static Messages {
    static DEFAULT_MESSAGES: LazyLock<Messages> = LazyLock::new(|| {
        let entries = [
            (ERRORS_PREFIX_KEY, "errors"),
            (WARNINGS_PREFIX_KEY, "warnings"),
            (INFOS_PREFIX_KEY, "infos"),
            (PLACEHOLDER_KEY, "Filter by type or text"),
            (TOOLTIP_KEY, "Filter Problems"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Messages { entries }
    });
    &DEFAULT_MESSAGES
}

pub fn load_messages(path: Option<&Path>) -> Result<Messages, ConfigError> {
    if let Some(path) = path {
        load_messages_from_path(path)
    } else {
        Ok(Messages::new())
    }
}

pub fn load_messages_from_path(path: &Path) -> Result<Messages, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    json5::from_str::<Messages>(&raw).map_err(|e| ConfigError::Parse {
        path: path_display,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let messages = Messages::new().with(ERRORS_PREFIX_KEY, "fehler");
        assert_eq!(messages.get(ERRORS_PREFIX_KEY), Some("fehler"));
        assert_eq!(messages.get(WARNINGS_PREFIX_KEY), Some("warnings"));
        assert_eq!(messages.get("no.such.key"), None);
        assert_eq!(messages.lookup("no.such.key"), "no.such.key");
    }
}

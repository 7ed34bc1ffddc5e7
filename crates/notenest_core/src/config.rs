//! Controller configuration.
//!
//! # Invariants
//! - Every field has a default, so `{}` is a complete configuration.
//! - A validated config has a non-empty storage key and a non-zero title limit.

use crate::model::note::TITLE_MAX_CHARS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Blob store key holding the serialized note collection.
pub const DEFAULT_STORAGE_KEY: &str = "notenest-notes";
/// Minimum visible loading time before the list appears.
pub const DEFAULT_LOAD_DELAY_MS: u64 = 600;
/// Lifetime of the success notice.
pub const DEFAULT_NOTICE_DISMISS_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NotesConfig {
    pub storage_key: String,
    pub load_delay_ms: u64,
    pub notice_dismiss_ms: u64,
    pub title_max_chars: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            load_delay_ms: DEFAULT_LOAD_DELAY_MS,
            notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

impl NotesConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            source: err,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storageKey must not be empty"));
        }
        if self.title_max_chars == 0 {
            return Err(ConfigError::Invalid("titleMaxChars must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

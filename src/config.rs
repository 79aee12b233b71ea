use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::emergency::EmergencyCategory;

/// Application-level constants
pub const APP_NAME: &str = "ChatMate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name inside `config_dir()`.
pub const CONFIG_FILE_NAME: &str = "chatmate.json";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "chatmate=info"
}

/// Get the per-user configuration directory (e.g. ~/.config/ChatMate/).
/// Falls back to the working directory when the platform has none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the default engine config file path
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid emergency pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Additional emergency phrasing, appended after the built-in patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEmergencyPattern {
    pub category: EmergencyCategory,
    /// Regular expression matched against normalized text (lower-case
    /// letters and single spaces only).
    pub pattern: String,
}

/// Engine and session tuning. Every field has a default, so an empty JSON
/// object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed part of the artificial "typing" delay.
    pub typing_delay_ms: u64,
    /// Upper bound of the random part added on top of `typing_delay_ms`.
    pub typing_jitter_ms: u64,
    /// Replaces the built-in welcome message when set.
    pub welcome_message: Option<String>,
    pub extra_emergency_patterns: Vec<CustomEmergencyPattern>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1500,
            typing_jitter_ms: 1000,
            welcome_message: None,
            extra_emergency_patterns: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// No artificial delay. Useful for tests and non-interactive surfaces.
    pub fn immediate() -> Self {
        Self {
            typing_delay_ms: 0,
            typing_jitter_ms: 0,
            ..Self::default()
        }
    }
}

/// Load an engine config from a JSON file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` if it exists, otherwise return defaults.
pub fn load_or_default(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No config file, using defaults");
        return Ok(EngineConfig::default());
    }
    load_config(path)
}

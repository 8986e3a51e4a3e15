//! Configuration for playctl
//!
//! Bootstrap configuration loaded from a TOML file. All fields have built-in
//! defaults defined in code; a missing file section falls back to those
//! defaults rather than failing.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Bootstrap configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Bundled audio resource handed to the backend on `start`
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Capacity of the broadcast event bus
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Capacity of the action and backend-report channels
    #[serde(default = "default_action_capacity")]
    pub action_capacity: usize,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("audio_file.mp3")
}

fn default_event_capacity() -> usize {
    100
}

fn default_action_capacity() -> usize {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            event_capacity: default_event_capacity(),
            action_capacity: default_action_capacity(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

//! Error types for playctl
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Failed transition guards (e.g. pause while not playing) are
//! deliberately not errors; the controller ignores them silently.

use thiserror::Error;

/// Main error type for playctl
#[derive(Error, Debug)]
pub enum Error {
    /// Audio backend failed to produce or operate a handle
    #[error("Backend error: {0}")]
    Backend(String),

    /// Status display service errors
    #[error("Display error: {0}")]
    Display(String),

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Controller task is no longer running
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
}

/// Convenience Result type using playctl Error
pub type Result<T> = std::result::Result<T, Error>;

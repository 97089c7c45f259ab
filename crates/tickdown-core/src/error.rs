//! Core error types for tickdown-core.
//!
//! Most failures in this system are swallowed at the boundary where they
//! occur (stale window ids, missing platform capabilities); the variants
//! here cover the paths that do propagate to a caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tickdown-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown or unparseable IANA time zone identifier
    #[error("Invalid time zone id '{0}'")]
    InvalidTimeZone(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

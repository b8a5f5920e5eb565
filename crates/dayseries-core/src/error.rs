//! Core error types for dayseries-core.
//!
//! This module defines the error hierarchy using thiserror. Absence of data
//! is never an error here: a date with no observation is `None`, not
//! `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayseries-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Series-related errors
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the series to storage failed
    #[error("Failed to persist series to {path}: {message}")]
    PersistenceFailed { path: PathBuf, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the series store and the smoothing engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// A record could not be turned into an observation. Fails the whole load.
    #[error("Malformed record at index {index}: {message}")]
    MalformedRecord { index: usize, message: String },

    /// Window size must be an odd positive integer
    #[error("Invalid window size {0}: must be an odd positive integer")]
    InvalidWindowSize(i64),

    /// A value that cannot be stored (NaN or infinite)
    #[error("Invalid value {value}: must be a finite number")]
    InvalidValue { value: f64 },

    /// Date string not in a supported format
    #[error("Invalid date '{input}': {message}")]
    InvalidDate { input: String, message: String },

    /// Date cannot be written in the four-digit-year record format
    #[error("Date {0} is out of range: year must be between 0 and 9999")]
    DateOutOfRange(chrono::NaiveDate),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! Core error types for thyroid-core.
//!
//! Nothing in this crate is fatal to the user: storage corruption is read
//! back as "absent", remote failures become fallbacks. The errors below are
//! what remains once those downgrades have been applied.

use std::path::PathBuf;
use thiserror::Error;

use crate::ritual::RitualPhase;

/// Core error type for thyroid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Ritual state machine misuse
    #[error("Ritual error: {0}")]
    Ritual(#[from] RitualError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Could not create or resolve the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(#[source] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors raised at the input boundary, before any state is touched.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A quantity that must be strictly positive was zero, negative or NaN
    #[error("'{field}' must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A required text field was empty
    #[error("'{field}' must not be blank")]
    Blank { field: &'static str },
}

/// Ritual state machine errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RitualError {
    /// `take_pill` while a cycle is already running or awaiting `finish`
    #[error("A ritual is already in progress (phase {phase:?}); finish it first")]
    AlreadyActive { phase: RitualPhase },
}

/// Alarm playback errors. Always swallowed by the alarm latch.
#[derive(Error, Debug)]
pub enum AlarmError {
    /// No audio backend or terminal to play on
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// Writing the cue failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recommendation service errors. Always converted to a fallback by the advisor.
#[derive(Error, Debug)]
pub enum AdviceError {
    /// Empty breakfast description; never sent
    #[error("Nothing to analyze: input is empty")]
    EmptyInput,

    /// Base URL could not be parsed or joined
    #[error("Invalid advice service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Advice service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the contract
    #[error("Malformed advice response: {0}")]
    Malformed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

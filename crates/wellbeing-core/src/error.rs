//! Core error types for wellbeing-core.
//!
//! This module defines the error hierarchy using thiserror. The three
//! kinds callers act on are [`CoreError::Validation`] (bad input),
//! [`CoreError::DuplicateDate`] (the write must not be persisted) and
//! [`CoreError::Database`] (the store is unavailable).

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for wellbeing-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store unavailable: the entry store failed to read or write.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Another entry already exists on the requested day.
    #[error("An entry for {day} already exists (id: {existing_id})")]
    DuplicateDate { existing_id: String, day: NaiveDate },

    /// No entry with the given id.
    #[error("Entry not found: {id}")]
    NotFound { id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row could not be turned back into an entry
    #[error("Corrupt row for entry {id}: {message}")]
    CorruptRow { id: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A rating outside 1..=10
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: u8,
        max: u8,
    },

    /// Date or date-time that could not be parsed
    #[error("Invalid date '{input}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM")]
    InvalidDate { input: String },

    /// Clock time that could not be parsed
    #[error("Invalid time '{input}': expected HH:MM")]
    InvalidTime { input: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

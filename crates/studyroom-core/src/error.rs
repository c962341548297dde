//! Core error types for studyroom-core.
//!
//! This module defines the error hierarchy using thiserror. None of these
//! errors is fatal: callers surface them as notifications and keep going.

use std::path::PathBuf;
use thiserror::Error;

use crate::entities::EntityKind;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Required field missing or out of range on add
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Toggle/delete on an unknown id
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// Corrupt persisted data
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Subject name already taken
    #[error("A {kind} named '{name}' already exists")]
    Duplicate { kind: EntityKind, name: String },

    /// Import bundle was not well-formed; nothing was applied
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// Persistence backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Title/message pair for delivering this error as a notification.
    pub fn notification_text(&self) -> (&'static str, String) {
        let title = match self {
            CoreError::Validation(_) => "Missing information",
            CoreError::Duplicate { .. } => "Already exists",
            CoreError::InvalidImport(_) => "Import failed",
            CoreError::NotFound { .. } => "Not found",
            _ => "Error",
        };
        (title, self.to_string())
    }
}

/// Validation errors raised by `add` operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("'{field}' is required")]
    MissingField { field: &'static str },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Persisted value exists but could not be decoded.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("stored value for '{key}' is not valid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value backend errors.
#[derive(Error, Debug)]
pub enum StorageError {
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

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! Error types for the dotstate actual-state and persistent-state core.

use crate::path::AbsPath;
use crate::system::FileMode;
use std::sync::Arc;
use thiserror::Error;

/// Actual-state errors
///
/// Cloneable so that a memoized fetch failure can be handed out again
/// without repeating the I/O that produced it.
#[derive(Debug, Clone, Error)]
pub enum EntryError {
    #[error("{path}: unsupported file type {mode}")]
    UnsupportedFileType { path: AbsPath, mode: FileMode },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for EntryError {
    fn from(err: std::io::Error) -> Self {
        EntryError::Io(Arc::new(err))
    }
}

impl EntryError {
    /// Kind of the underlying I/O failure, if any
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            EntryError::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Persistent state errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Persistent state is read-only: cannot modify bucket {bucket}")]
    ReadOnly { bucket: String },

    #[error("Persistent state database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StorageError::IoError(io),
            other => StorageError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Command-layer errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    EntryError(#[from] EntryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid format: {0} (must be 'json' or 'yaml')")]
    InvalidFormat(String),

    #[error("Failed to get user input: {0}")]
    PromptFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

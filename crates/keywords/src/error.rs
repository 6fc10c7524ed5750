//! Error types for the keyword engine.
//!
//! Configuration problems and store failures are kept apart: configuration
//! errors are raised at setup (or when a caller passes an unknown match mode)
//! and are never retried, while storage errors come from the
//! [`KeywordStore`](crate::core::KeywordStore) and are handed back unchanged.
//!
//! Text normalization has no error type. Absent, null and non-string values
//! are coerced to strings instead.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type returned by [`KeywordIndex`](crate::KeywordIndex).
#[derive(Error, Debug)]
pub enum KeywordError {
    /// Invalid configuration or query options.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failure reported by the backing store.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl KeywordError {
    /// Returns true if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, KeywordError::Config(_))
    }

    /// Returns true if this error came from the store.
    pub fn is_storage(&self) -> bool {
        matches!(self, KeywordError::Storage(_))
    }
}

/// Errors raised while validating index or query configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The keyword mode is not one of plain, stem or phonetic.
    #[error("unknown keyword mode '{value}': expected plain, stem or phonetic")]
    UnknownMode { value: String },

    /// The match mode is not one of all or any.
    #[error("unknown match mode '{value}': expected all or any")]
    UnknownMatchMode { value: String },

    /// One or more configuration values failed validation.
    #[error("invalid index configuration: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },
}

/// Errors reported by a [`KeywordStore`](crate::core::KeywordStore).
#[derive(Error, Debug)]
pub enum StorageError {
    /// The record does not exist in the collection.
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// The backend rejected or failed the operation.
    #[error("backend error in {backend_name}: {message}")]
    Backend {
        backend_name: String,
        message: String,
    },

    /// The backend could not be reached.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },
}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for engine operations.
pub type KeywordResult<T> = Result<T, KeywordError>;

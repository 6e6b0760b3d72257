//! Error types and result types for store operations.
//!
//! Every handler of a store backend returns a [`StoreResult<T>`]. Filesystem failures are
//! classified with [`StoreError::from_io`] so callers can tell a missing collection file
//! apart from any other I/O failure.

use std::{io, path::Path};

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when a store handles a host event.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required parameter was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A file expected to exist does not.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The underlying filesystem call failed (permissions, disk full, directory creation).
    #[error("I/O error: {0}")]
    Io(String),
    /// A document could not be converted to or from its JSON line.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The operation exists in the event contract but is not supported by the backend.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// A specialized `Result` type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
            _ => StoreError::Io(format!("{}: {}", path.display(), err)),
        }
    }

    /// Builds a [`StoreError::NotImplemented`] for the named operation.
    pub fn not_implemented(operation: &str) -> Self {
        StoreError::NotImplemented(operation.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

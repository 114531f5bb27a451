//! Error types for ifinv core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record with the given id exists in the store.
    #[error("Interface with id '{id}' not found")]
    RecordNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Sort key is not one of the record's field names.
    #[error("unknown sort field: {0}")]
    InvalidSortField(String),

    /// Sort direction is neither `asc` nor `desc`.
    #[error("unknown sort direction: {0}")]
    InvalidSortDirection(String),

    /// A CSV seed line could not be parsed.
    #[error("invalid CSV at line {line}: {message}")]
    InvalidCsv {
        /// 1-based line number in the source file.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates a not-found error for the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        CoreError::RecordNotFound { id: id.into() }
    }

    /// Returns true if this error means the requested record is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::RecordNotFound { .. })
    }
}

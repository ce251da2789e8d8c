//! Error types for Bookshelf Core

use crate::types::BookId;
use thiserror::Error;

/// Errors raised by a [`crate::BookDatabase`] implementation
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no book with ID {0}")]
    NotFound(BookId),

    #[error("book already exists: {0}")]
    AlreadyExists(String),

    /// The backing medium failed; `op` names the operation that hit it.
    #[error("DB: {op}: {message}")]
    Backend { op: &'static str, message: String },
}

impl DatabaseError {
    pub fn backend(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Backend {
            op,
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors that occur during blob storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage bucket is missing: set BOOKSHELF_UPLOAD_DIR")]
    NotConfigured,

    #[error("bucket {0:?} does not exist")]
    BucketNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_carries_operation_prefix() {
        let err = DatabaseError::backend("list", "connection refused");
        assert_eq!(err.to_string(), "DB: list: connection refused");
        assert!(!err.is_not_found());
    }
}

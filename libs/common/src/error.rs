//! Custom error types for the common library
//!
//! This module defines the error taxonomy for the document store so that
//! every collection access reports failures the same way, regardless of the
//! backing engine.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for document-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while connecting to the store
    #[error("store connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred while executing a store operation
    #[error("store query error: {0}")]
    Query(#[source] SqlxError),

    /// A stored document could not be decoded into its model
    #[error("stored document could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configuration error
    #[error("store configuration error: {0}")]
    Configuration(String),
}

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        StoreError::Query(err)
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

//! Store Error Types
//!
//! Errors reported by a [`DocumentStore`](super::DocumentStore) implementation.
//! The tree services propagate them unchanged.

use thiserror::Error;

/// Document store operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend failed to execute a read or write
    #[error("Store operation failed: {0}")]
    Backend(String),

    /// A write addressed a document that does not exist
    #[error("Document not found: {id}")]
    NotFound { id: String },

    /// A document could not be built from the supplied data
    #[error("Invalid document: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    /// Create a backend failure error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

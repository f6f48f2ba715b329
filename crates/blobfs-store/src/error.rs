//! Error types for the blobfs-store crate

use crate::CopyId;
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur at the object store boundary
#[derive(Error, Debug)]
pub enum StoreError {
    /// Container not found
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// Object not found
    #[error("object not found: {container}/{key}")]
    NotFound { container: String, key: String },

    /// Unknown copy handle
    #[error("unknown copy handle: {0}")]
    CopyNotFound(CopyId),

    /// Continuation token not understood by this backend
    #[error("invalid continuation token: {0}")]
    InvalidToken(String),

    /// Backend-specific failure
    #[error("backend error: {0}")]
    Backend(String),
}

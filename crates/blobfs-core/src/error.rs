//! Error types for the blobfs-core crate

use blobfs_store::StoreError;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in namespace operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Container resolution or creation failed
    #[error("invalid container name: {name}")]
    InvalidContainerName {
        name: String,
        #[source]
        source: StoreError,
    },

    /// File extension not on the allow-list
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    /// Rename source missing; no copy was attempted
    #[error("rename source not found: {0}")]
    SourceNotFound(String),

    /// Rename copy settled to a non-success state; source left untouched
    #[error("copy from {source_key} to {dest_key} failed")]
    CopyFailed {
        source_key: String,
        dest_key: String,
    },

    /// Rename copy still pending when the polling deadline passed
    #[error("rename from {source_key} to {dest_key} timed out while the copy was pending")]
    RenameTimedOut {
        source_key: String,
        dest_key: String,
    },

    /// Key not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Object store error
    #[error("object store error: {0}")]
    Store(#[from] StoreError),
}

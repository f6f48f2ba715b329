//! # blobfs
//!
//! Hierarchical namespace emulation over a flat, key-addressed object store:
//! files, folders, paged listings, rename, and per-directory statistics
//! synthesized from nothing but keys, a delimiter convention, and folder
//! placeholder objects.
//!
//! The [`blobfs_core`] crate holds the namespace logic; [`blobfs_store`]
//! defines the capability boundary a backing store must satisfy and ships an
//! in-memory implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use blobfs::{FileManager, MemoryObjectStore, NamespaceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryObjectStore::new());
//! let files = FileManager::new(store, NamespaceConfig::new("media"));
//!
//! files.create_directory("", "docs").await?;
//! files
//!     .create_file("docs/", "report.pdf", bytes::Bytes::from_static(b"..."))
//!     .await?;
//! let listing = files.list_directory("").await?;
//! # Ok(())
//! # }
//! ```

pub use blobfs_core::{
    ContainerStats, CoreError, DirectoryPage, FileManager, NamespaceConfig, RenameConfig,
    VirtualEntry,
};
pub use blobfs_store::{
    ContainerAccess, MemoryObjectStore, ObjectStore, PageToken, StoreError,
};

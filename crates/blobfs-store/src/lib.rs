//! # Blobfs Store
//!
//! Object store capability boundary for the blobfs namespace layer.
//!
//! This crate provides:
//! - **`ObjectStore` trait**: the narrow contract the namespace layer needs
//!   from a flat, key-addressed blob store
//! - **Paged prefix listing**: delimiter grouping with opaque continuation
//!   tokens
//! - **Server-side copy**: an asynchronous copy handle polled until it settles
//! - **`MemoryObjectStore`**: deterministic in-memory backend for tests
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Namespace Layer (blobfs-core)   │
//! ├─────────────────────────────────────────┤
//! │            ObjectStore Trait            │
//! ├─────────────────────┬───────────────────┤
//! │  MemoryObjectStore  │  remote backends  │
//! └─────────────────────┴───────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use blobfs_store::{MemoryObjectStore, ObjectStore, ContainerAccess};
//!
//! let store = MemoryObjectStore::new();
//! store.ensure_container("media", ContainerAccess::Private).await?;
//! store.put("media", "docs/report.pdf", content).await?;
//! ```

pub mod error;
pub mod memory;

pub use error::{Result, StoreError};
pub use memory::MemoryObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of grouped results per listing page when the caller does
/// not request a size.
pub const DEFAULT_PAGE_SIZE: usize = 5000;

/// Access policy applied when a container is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContainerAccess {
    /// No anonymous access
    #[default]
    Private,
    /// Anonymous read access to objects
    Public,
}

/// Metadata for one stored object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Full object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

/// Opaque cursor over a paged listing.
///
/// Callers must not inspect the contents or assume anything beyond
/// "resubmitting it continues the same logical enumeration."
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a backend-defined cursor value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Backend-side accessor for the raw cursor value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One item of a delimiter-grouped listing.
#[derive(Clone, Debug)]
pub enum ListItem {
    /// A real stored object
    Object(ObjectInfo),
    /// A group of keys sharing a common prefix up to the delimiter
    CommonPrefix(String),
}

/// Parameters for a paged prefix listing.
#[derive(Clone, Debug, Default)]
pub struct ListRequest {
    /// Only keys starting with this prefix are returned
    pub prefix: String,
    /// When set, keys are grouped into common prefixes at this delimiter
    pub delimiter: Option<String>,
    /// Maximum number of grouped results in the returned page
    pub page_size: Option<usize>,
    /// Cursor from a previous page, or `None` for the first page
    pub token: Option<PageToken>,
}

impl ListRequest {
    /// Request every key under a prefix, ungrouped.
    pub fn recursive(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Request one hierarchy level under a prefix.
    pub fn grouped(prefix: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: Some(delimiter.into()),
            ..Self::default()
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Resume from a previous page's cursor.
    pub fn with_token(mut self, token: Option<PageToken>) -> Self {
        self.token = token;
        self
    }
}

/// One page of listing results.
#[derive(Clone, Debug)]
pub struct ListPage {
    /// Grouped results, in key order
    pub items: Vec<ListItem>,
    /// Cursor for the next page, absent on the final page
    pub next_token: Option<PageToken>,
}

/// Handle for an in-flight server-side copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyId(Uuid);

impl CopyId {
    /// Generate a fresh handle.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CopyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Settlement state of a server-side copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyStatus {
    /// Copy still in progress
    Pending,
    /// Destination object fully written
    Succeeded,
    /// Copy settled without producing the destination
    Failed,
}

/// Trait for flat object storage backends.
///
/// Every method is a suspension point; implementations must not block the
/// calling task while waiting on the backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create a container if it does not exist; succeeds when it already does.
    async fn ensure_container(&self, name: &str, access: ContainerAccess) -> Result<()>;

    /// Enumerate one page of keys under a prefix, optionally grouped at a
    /// delimiter.
    async fn list(&self, container: &str, request: ListRequest) -> Result<ListPage>;

    /// Fetch object metadata without content; `None` when the key is absent.
    async fn head(&self, container: &str, key: &str) -> Result<Option<ObjectInfo>>;

    /// Fetch object content.
    async fn get(&self, container: &str, key: &str) -> Result<Bytes>;

    /// Write an object, overwriting any existing content at the key.
    async fn put(&self, container: &str, key: &str, content: Bytes) -> Result<ObjectInfo>;

    /// Delete an object; returns whether the key existed.
    async fn delete(&self, container: &str, key: &str) -> Result<bool>;

    /// Start an asynchronous server-side copy between two keys.
    async fn copy(&self, container: &str, source_key: &str, dest_key: &str) -> Result<CopyId>;

    /// Poll the settlement state of a copy started with [`ObjectStore::copy`].
    async fn copy_status(&self, id: CopyId) -> Result<CopyStatus>;
}

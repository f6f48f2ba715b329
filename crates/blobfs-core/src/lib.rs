//! # Blobfs Core
//!
//! Hierarchical namespace emulation over a flat, key-addressed object store.
//!
//! This crate provides:
//! - **Path codec**: virtual path / object key conventions and the folder
//!   placeholder scheme
//! - **Namespace walking**: delimiter-grouped listing of immediate children,
//!   with placeholder objects hidden
//! - **Pagination**: one-store-page-at-a-time listing with opaque
//!   continuation tokens
//! - **Folder lifecycle**: placeholder-backed create and best-effort
//!   recursive delete
//! - **Rename protocol**: copy-then-delete with bounded status polling
//! - **Statistics**: breadth-first aggregation of counts and per-directory
//!   sizes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            FileManager Facade           │
//! ├──────────┬─────────┬──────────┬─────────┤
//! │  Walker  │ Folder  │  Rename  │  Stats  │
//! ├──────────┴─────────┴──────────┴─────────┤
//! │        ObjectStore (blobfs-store)       │
//! └─────────────────────────────────────────┘
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod folder;
pub mod manager;
pub mod path;
pub mod rename;
pub mod stats;
pub mod validate;
pub mod walker;

pub use config::{NamespaceConfig, RenameConfig};
pub use entry::{DirectoryPage, VirtualEntry};
pub use error::{CoreError, Result};
pub use manager::FileManager;
pub use stats::ContainerStats;

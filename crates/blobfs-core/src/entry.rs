//! Entries of the synthesized namespace

use crate::path;
use blobfs_store::{ObjectInfo, PageToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One file or folder in the synthesized namespace.
///
/// Folder entries are never stored as objects themselves; they exist because
/// at least one key (possibly just the placeholder) lives under their prefix.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VirtualEntry {
    /// Opaque identifier generated per materialization. Two reads of the
    /// same entry yield different ids; this is a display convenience, not an
    /// identity guarantee.
    pub id: Uuid,
    /// Leaf name, without delimiter
    pub name: String,
    /// Full virtual path; equals the object key for files and the key prefix
    /// for folders
    pub path: String,
    /// Whether this entry is a folder
    pub is_directory: bool,
    /// Folders only: whether at least one non-placeholder descendant exists
    pub has_children: bool,
    /// Exact object byte length; files only
    pub size: Option<u64>,
    /// Creation timestamp; files only
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp; files only
    pub modified_at: Option<DateTime<Utc>>,
}

impl VirtualEntry {
    /// Materialize a file entry from stored object metadata.
    pub fn file(info: &ObjectInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: path::leaf_name(&info.key).to_string(),
            path: info.key.clone(),
            is_directory: false,
            has_children: false,
            size: Some(info.size),
            created_at: Some(info.created_at),
            modified_at: Some(info.modified_at),
        }
    }

    /// Synthesize a folder entry for a directory prefix.
    pub fn folder(prefix: impl Into<String>, has_children: bool) -> Self {
        let prefix = prefix.into();
        Self {
            id: Uuid::new_v4(),
            name: path::leaf_name(&prefix).to_string(),
            path: prefix,
            is_directory: true,
            has_children,
            size: None,
            created_at: None,
            modified_at: None,
        }
    }
}

/// One page of a hierarchical directory listing.
///
/// Page granularity follows the store's native page boundaries, not the
/// requested page size: placeholder filtering can shrink a page below the
/// requested size even when more pages follow.
#[derive(Clone, Debug)]
pub struct DirectoryPage {
    /// Entries of this page, in store key order
    pub entries: Vec<VirtualEntry>,
    /// Cursor for the next page, absent on the final page
    pub next_token: Option<PageToken>,
}

//! Hierarchy walking over the flat key space
//!
//! Grouped listings come back from the store one page at a time; this module
//! turns store pages into namespace entries, hiding placeholder objects and
//! synthesizing folder entries from common prefixes.

use crate::entry::{DirectoryPage, VirtualEntry};
use crate::{path, Result};
use blobfs_store::{ListItem, ListRequest, ObjectStore, PageToken};
use tracing::instrument;

/// Page size used when probing a prefix for the first non-placeholder item.
const PROBE_PAGE_SIZE: usize = 16;

/// Enumerate the immediate children of a directory prefix.
///
/// Placeholder objects are infrastructure and never appear in the result.
/// Each discovered sub-folder's `has_children` comes from a nested probe of
/// its prefix. A fresh call re-enumerates from the start; results are never
/// cached.
#[instrument(skip(store))]
pub async fn list_immediate_children<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    prefix: &str,
) -> Result<Vec<VirtualEntry>> {
    let mut entries = Vec::new();
    let mut token: Option<PageToken> = None;

    loop {
        let page = store
            .list(
                container,
                ListRequest::grouped(prefix, path::DELIMITER).with_token(token),
            )
            .await?;

        for item in page.items {
            if let Some(entry) = materialize(store, container, item).await? {
                entries.push(entry);
            }
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(entries)
}

/// Fetch one page of a directory listing.
///
/// Exactly one store page is requested, with the same delimiter grouping as
/// [`list_immediate_children`]. Group flattening happens inside the page,
/// never across pages, so a page can come back shorter than `page_size`
/// (placeholder filtering) while a continuation token is still present.
#[instrument(skip(store, token))]
pub async fn list_page<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    prefix: &str,
    page_size: usize,
    token: Option<PageToken>,
) -> Result<DirectoryPage> {
    let page = store
        .list(
            container,
            ListRequest::grouped(prefix, path::DELIMITER)
                .with_page_size(page_size)
                .with_token(token),
        )
        .await?;

    let mut entries = Vec::with_capacity(page.items.len());
    for item in page.items {
        if let Some(entry) = materialize(store, container, item).await? {
            entries.push(entry);
        }
    }

    Ok(DirectoryPage {
        entries,
        next_token: page.next_token,
    })
}

/// Whether anything other than a placeholder lives under a prefix.
///
/// Probes the whole subtree flat (no delimiter grouping) in small pages and
/// returns at the first non-placeholder object rather than draining the
/// enumeration. A subtree holding only placeholders at any depth has no
/// descendants.
pub async fn has_non_placeholder_descendant<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    prefix: &str,
) -> Result<bool> {
    let mut token: Option<PageToken> = None;

    loop {
        let page = store
            .list(
                container,
                ListRequest::recursive(prefix)
                    .with_page_size(PROBE_PAGE_SIZE)
                    .with_token(token),
            )
            .await?;

        for item in &page.items {
            if let ListItem::Object(info) = item {
                if !path::is_placeholder(&info.key) {
                    return Ok(true);
                }
            }
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(false),
        }
    }
}

async fn materialize<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    item: ListItem,
) -> Result<Option<VirtualEntry>> {
    match item {
        ListItem::Object(info) => {
            if path::is_placeholder(&info.key) {
                return Ok(None);
            }
            Ok(Some(VirtualEntry::file(&info)))
        }
        ListItem::CommonPrefix(group) => {
            let has_children = has_non_placeholder_descendant(store, container, &group).await?;
            Ok(Some(VirtualEntry::folder(group, has_children)))
        }
    }
}

//! Folder lifecycle: placeholder-backed create, best-effort recursive delete

use crate::entry::VirtualEntry;
use crate::{path, walker, Result};
use blobfs_store::{ListItem, ListRequest, ObjectStore, PageToken};
use bytes::Bytes;
use tracing::{instrument, warn};

/// Content written to placeholder objects.
const PLACEHOLDER_CONTENT: &[u8] = b"placeholder";

/// Create a folder by writing its placeholder object.
///
/// The placeholder is overwritten unconditionally, so creating a folder that
/// already exists is idempotent. The returned entry carries a freshly
/// computed `has_children`.
#[instrument(skip(store))]
pub async fn create_folder<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    prefix: &str,
) -> Result<VirtualEntry> {
    let directory = path::as_directory(prefix);
    let key = path::placeholder_key(&directory);
    store
        .put(container, &key, Bytes::from_static(PLACEHOLDER_CONTENT))
        .await?;

    let has_children = walker::has_non_placeholder_descendant(store, container, &directory).await?;
    Ok(VirtualEntry::folder(directory, has_children))
}

/// Delete every object under a folder prefix, placeholder included.
///
/// Enumeration is fully recursive (no delimiter grouping). Each delete is
/// best-effort: a key missing at delete time is omitted from the result, and
/// an individual delete failure is logged and skipped rather than aborting
/// the batch. Returns the keys that were confirmed deleted.
#[instrument(skip(store))]
pub async fn delete_folder<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    prefix: &str,
) -> Result<Vec<String>> {
    let directory = path::as_directory(prefix);
    let mut deleted = Vec::new();
    let mut token: Option<PageToken> = None;

    loop {
        let page = store
            .list(container, ListRequest::recursive(&directory).with_token(token))
            .await?;

        for item in page.items {
            let ListItem::Object(info) = item else {
                continue;
            };
            match store.delete(container, &info.key).await {
                Ok(true) => deleted.push(info.key),
                Ok(false) => {}
                Err(error) => {
                    warn!(key = %info.key, %error, "delete failed, continuing with remaining objects");
                }
            }
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobfs_store::{ContainerAccess, MemoryObjectStore};

    const CONTAINER: &str = "test";

    async fn empty_store() -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        store
            .ensure_container(CONTAINER, ContainerAccess::Private)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_folder_writes_placeholder() {
        let store = empty_store().await;

        let entry = create_folder(&store, CONTAINER, "docs").await.unwrap();
        assert!(entry.is_directory);
        assert_eq!(entry.name, "docs");
        assert_eq!(entry.path, "docs/");
        assert!(!entry.has_children);

        assert!(store.contains(CONTAINER, "docs/.placeholder"));
    }

    #[tokio::test]
    async fn test_create_folder_is_idempotent() {
        let store = empty_store().await;
        create_folder(&store, CONTAINER, "docs").await.unwrap();
        create_folder(&store, CONTAINER, "docs").await.unwrap();
        assert_eq!(store.object_count(CONTAINER), 1);
    }

    #[tokio::test]
    async fn test_created_folder_visible_from_parent_without_placeholder() {
        let store = empty_store().await;
        create_folder(&store, CONTAINER, "docs").await.unwrap();

        let entries = walker::list_immediate_children(&store, CONTAINER, "")
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].name, "docs");
    }

    #[tokio::test]
    async fn test_delete_folder_removes_everything_under_prefix() {
        let store = empty_store().await;
        for key in [
            "docs/.placeholder",
            "docs/a.txt",
            "docs/sub/.placeholder",
            "docs/sub/b.txt",
            "other/c.txt",
        ] {
            store
                .put(CONTAINER, key, Bytes::from_static(b"x"))
                .await
                .unwrap();
        }

        let mut deleted = delete_folder(&store, CONTAINER, "docs").await.unwrap();
        deleted.sort();
        assert_eq!(
            deleted,
            vec![
                "docs/.placeholder".to_string(),
                "docs/a.txt".to_string(),
                "docs/sub/.placeholder".to_string(),
                "docs/sub/b.txt".to_string(),
            ]
        );

        let children = walker::list_immediate_children(&store, CONTAINER, "docs/")
            .await
            .unwrap();
        assert!(children.is_empty());
        assert!(store.contains(CONTAINER, "other/c.txt"));
    }

    #[tokio::test]
    async fn test_delete_continues_past_individual_failure() {
        let store = empty_store().await;
        for key in ["docs/a.txt", "docs/b.txt", "docs/c.txt"] {
            store
                .put(CONTAINER, key, Bytes::from_static(b"x"))
                .await
                .unwrap();
        }

        // First delete in key order (docs/a.txt) fails; the batch keeps
        // going and the failed key is omitted from the result.
        store.fail_next_delete();
        let deleted = delete_folder(&store, CONTAINER, "docs").await.unwrap();
        assert_eq!(
            deleted,
            vec!["docs/b.txt".to_string(), "docs/c.txt".to_string()]
        );
        assert!(store.contains(CONTAINER, "docs/a.txt"));
    }

    #[tokio::test]
    async fn test_delete_empty_prefix_returns_empty() {
        let store = empty_store().await;
        let deleted = delete_folder(&store, CONTAINER, "ghost").await.unwrap();
        assert!(deleted.is_empty());
    }

    #[tokio::test]
    async fn test_delete_does_not_take_sibling_with_shared_name_prefix() {
        let store = empty_store().await;
        store
            .put(CONTAINER, "docs/a.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();
        store
            .put(CONTAINER, "docs2/b.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let deleted = delete_folder(&store, CONTAINER, "docs").await.unwrap();
        assert_eq!(deleted, vec!["docs/a.txt".to_string()]);
        assert!(store.contains(CONTAINER, "docs2/b.txt"));
    }
}

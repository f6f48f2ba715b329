//! Rename as a copy-then-delete protocol
//!
//! The store has no atomic rename, so rename is two phases with a window
//! where both keys may transiently coexist. The copy is polled with
//! exponential backoff under an overall deadline; the source is deleted only
//! after the copy settles successfully.

use crate::config::RenameConfig;
use crate::entry::VirtualEntry;
use crate::{CoreError, Result};
use blobfs_store::{CopyStatus, ObjectStore};
use tokio::time::Instant;
use tracing::{instrument, warn};

/// Move an object from `source_key` to `dest_key`.
///
/// Fails with [`CoreError::SourceNotFound`] before any copy is attempted if
/// the source is missing, with [`CoreError::CopyFailed`] if the copy settles
/// to a non-success state (source untouched), and with
/// [`CoreError::RenameTimedOut`] if the copy is still pending at the
/// deadline. After a successful copy the source delete is best-effort: a
/// transient duplicate is tolerated over data loss.
#[instrument(skip(store, config))]
pub async fn rename<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    source_key: &str,
    dest_key: &str,
    config: &RenameConfig,
) -> Result<VirtualEntry> {
    if store.head(container, source_key).await?.is_none() {
        return Err(CoreError::SourceNotFound(source_key.to_string()));
    }

    let copy_id = store.copy(container, source_key, dest_key).await?;

    let deadline = Instant::now() + config.timeout;
    let mut interval = config.initial_poll_interval;
    let status = loop {
        match store.copy_status(copy_id).await? {
            CopyStatus::Pending => {
                if Instant::now() >= deadline {
                    return Err(CoreError::RenameTimedOut {
                        source_key: source_key.to_string(),
                        dest_key: dest_key.to_string(),
                    });
                }
                tokio::time::sleep(interval).await;
                interval = interval.saturating_mul(2).min(config.max_poll_interval);
            }
            settled => break settled,
        }
    };

    if status != CopyStatus::Succeeded {
        return Err(CoreError::CopyFailed {
            source_key: source_key.to_string(),
            dest_key: dest_key.to_string(),
        });
    }

    if let Err(error) = store.delete(container, source_key).await {
        warn!(key = %source_key, %error, "source delete failed after copy; duplicate left behind");
    }

    let info = store
        .head(container, dest_key)
        .await?
        .ok_or_else(|| CoreError::NotFound(dest_key.to_string()))?;
    Ok(VirtualEntry::file(&info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobfs_store::{ContainerAccess, MemoryObjectStore};
    use bytes::Bytes;
    use std::time::Duration;

    const CONTAINER: &str = "test";

    fn fast_config() -> RenameConfig {
        RenameConfig {
            initial_poll_interval: Duration::from_millis(1),
            max_poll_interval: Duration::from_millis(2),
            timeout: Duration::from_millis(20),
        }
    }

    async fn store_with_source() -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        store
            .ensure_container(CONTAINER, ContainerAccess::Private)
            .await
            .unwrap();
        store
            .put(CONTAINER, "docs/old.txt", Bytes::from_static(b"content"))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_rename_moves_object() {
        let store = store_with_source().await;

        let entry = rename(
            &store,
            CONTAINER,
            "docs/old.txt",
            "docs/new.txt",
            &fast_config(),
        )
        .await
        .unwrap();

        assert_eq!(entry.path, "docs/new.txt");
        assert_eq!(entry.name, "new.txt");
        assert_eq!(entry.size, Some(7));
        assert!(!store.contains(CONTAINER, "docs/old.txt"));
        assert!(store.contains(CONTAINER, "docs/new.txt"));
    }

    #[tokio::test]
    async fn test_rename_survives_pending_polls() {
        let store = store_with_source().await;
        store.set_copy_pending_polls(3);

        let entry = rename(
            &store,
            CONTAINER,
            "docs/old.txt",
            "docs/new.txt",
            &fast_config(),
        )
        .await
        .unwrap();
        assert_eq!(entry.path, "docs/new.txt");
        assert!(!store.contains(CONTAINER, "docs/old.txt"));
    }

    #[tokio::test]
    async fn test_missing_source_fails_without_copy() {
        let store = store_with_source().await;

        let result = rename(
            &store,
            CONTAINER,
            "docs/missing.txt",
            "docs/new.txt",
            &fast_config(),
        )
        .await;
        assert!(matches!(result, Err(CoreError::SourceNotFound(_))));
        assert!(!store.contains(CONTAINER, "docs/new.txt"));
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_source_untouched() {
        let store = store_with_source().await;
        store.fail_next_copy();

        let result = rename(
            &store,
            CONTAINER,
            "docs/old.txt",
            "docs/new.txt",
            &fast_config(),
        )
        .await;
        let error = result.unwrap_err();
        assert!(matches!(error, CoreError::CopyFailed { .. }));
        let message = error.to_string();
        assert!(message.contains("docs/old.txt"));
        assert!(message.contains("docs/new.txt"));
        assert!(store.contains(CONTAINER, "docs/old.txt"));
        assert!(!store.contains(CONTAINER, "docs/new.txt"));
    }

    #[tokio::test]
    async fn test_pending_past_deadline_times_out() {
        let store = store_with_source().await;
        store.set_copy_pending_polls(u32::MAX);

        let result = rename(
            &store,
            CONTAINER,
            "docs/old.txt",
            "docs/new.txt",
            &fast_config(),
        )
        .await;
        assert!(matches!(result, Err(CoreError::RenameTimedOut { .. })));
        assert!(store.contains(CONTAINER, "docs/old.txt"));
    }
}

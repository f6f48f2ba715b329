//! Container statistics via breadth-first namespace traversal

use crate::{path, Result};
use blobfs_store::{ListItem, ListRequest, ObjectStore, PageToken};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::instrument;

/// Map key attributing root-level files, since the root has no prefix of its
/// own.
pub const ROOT_DIRECTORY_KEY: &str = path::DELIMITER;

/// Aggregate statistics for one container.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerStats {
    /// Count of non-placeholder objects
    pub total_files: u64,
    /// Count of distinct directory prefixes discovered during traversal
    pub total_directories: u64,
    /// Quota supplied by configuration, never discovered from the store
    pub total_capacity: u64,
    /// Sum of non-placeholder object sizes
    pub used_capacity: u64,
    /// `total_capacity` minus `used_capacity`, saturating at zero
    pub remaining_capacity: u64,
    /// Byte totals per directory prefix. A file counts only toward its
    /// immediate parent ([`ROOT_DIRECTORY_KEY`] for root files); values are
    /// NOT rolled up into ancestor directories.
    pub size_per_directory: HashMap<String, u64>,
}

/// Compute statistics by walking the virtual tree breadth-first from the
/// root.
///
/// Everything is re-derived from the live store state; any enumeration error
/// fails the whole call rather than returning a partial aggregate.
#[instrument(skip(store))]
pub async fn container_stats<S: ObjectStore + ?Sized>(
    store: &S,
    container: &str,
    total_capacity: u64,
) -> Result<ContainerStats> {
    let mut total_files = 0u64;
    let mut used_capacity = 0u64;
    let mut discovered: HashSet<String> = HashSet::new();
    let mut size_per_directory: HashMap<String, u64> = HashMap::new();

    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(String::new());

    while let Some(current) = queue.pop_front() {
        let mut token: Option<PageToken> = None;
        loop {
            let page = store
                .list(
                    container,
                    ListRequest::grouped(&current, path::DELIMITER).with_token(token),
                )
                .await?;

            for item in page.items {
                match item {
                    ListItem::Object(info) => {
                        if path::is_placeholder(&info.key) {
                            continue;
                        }
                        total_files += 1;
                        used_capacity += info.size;
                        let key = if current.is_empty() {
                            ROOT_DIRECTORY_KEY.to_string()
                        } else {
                            current.clone()
                        };
                        *size_per_directory.entry(key).or_insert(0) += info.size;
                    }
                    ListItem::CommonPrefix(group) => {
                        if discovered.insert(group.clone()) {
                            queue.push_back(group);
                        }
                    }
                }
            }

            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
    }

    Ok(ContainerStats {
        total_files,
        total_directories: discovered.len() as u64,
        total_capacity,
        used_capacity,
        remaining_capacity: total_capacity.saturating_sub(used_capacity),
        size_per_directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobfs_store::{ContainerAccess, MemoryObjectStore};
    use bytes::Bytes;

    const CONTAINER: &str = "test";
    const QUOTA: u64 = 1000;

    async fn store_with(keys: &[(&str, usize)]) -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        store
            .ensure_container(CONTAINER, ContainerAccess::Private)
            .await
            .unwrap();
        for (key, size) in keys {
            store
                .put(CONTAINER, key, Bytes::from(vec![0u8; *size]))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_reference_scenario() {
        let store = store_with(&[
            ("a.txt", 10),
            ("docs/.placeholder", 11),
            ("docs/b.txt", 20),
        ])
        .await;

        let stats = container_stats(&store, CONTAINER, QUOTA).await.unwrap();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_directories, 1);
        assert_eq!(stats.used_capacity, 30);
        assert_eq!(stats.remaining_capacity, QUOTA - 30);
        assert_eq!(stats.size_per_directory.len(), 2);
        assert_eq!(stats.size_per_directory["/"], 10);
        assert_eq!(stats.size_per_directory["docs/"], 20);
    }

    #[tokio::test]
    async fn test_sizes_attribute_to_immediate_parent_only() {
        let store = store_with(&[
            ("a/one.txt", 1),
            ("a/b/two.txt", 2),
            ("a/b/c/three.txt", 4),
        ])
        .await;

        let stats = container_stats(&store, CONTAINER, QUOTA).await.unwrap();
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_directories, 3);
        assert_eq!(stats.used_capacity, 7);
        // Flat per-directory sums, no ancestor rollup.
        assert_eq!(stats.size_per_directory["a/"], 1);
        assert_eq!(stats.size_per_directory["a/b/"], 2);
        assert_eq!(stats.size_per_directory["a/b/c/"], 4);
    }

    #[tokio::test]
    async fn test_per_directory_sums_add_up_to_used_capacity() {
        let store = store_with(&[
            ("r1.txt", 3),
            ("r2.txt", 5),
            ("x/f.txt", 7),
            ("x/y/g.txt", 11),
            ("z/.placeholder", 11),
        ])
        .await;

        let stats = container_stats(&store, CONTAINER, QUOTA).await.unwrap();
        let summed: u64 = stats.size_per_directory.values().sum();
        assert_eq!(summed, stats.used_capacity);
        assert_eq!(stats.used_capacity, 26);
        // z/ holds only its placeholder but still counts as a directory.
        assert_eq!(stats.total_directories, 3);
        assert!(!stats.size_per_directory.contains_key("z/"));
    }

    #[tokio::test]
    async fn test_empty_container() {
        let store = store_with(&[]).await;
        let stats = container_stats(&store, CONTAINER, QUOTA).await.unwrap();
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_directories, 0);
        assert_eq!(stats.used_capacity, 0);
        assert_eq!(stats.remaining_capacity, QUOTA);
        assert!(stats.size_per_directory.is_empty());
    }
}

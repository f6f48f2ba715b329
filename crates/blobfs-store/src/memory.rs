//! In-memory object store for testing the namespace layer
//!
//! Keys are held in a `BTreeMap`, so delimiter grouping and pagination are
//! deterministic and follow key order like a real store's flat namespace.

use crate::{
    ContainerAccess, CopyId, CopyStatus, ListItem, ListPage, ListRequest, ObjectInfo, ObjectStore,
    PageToken, Result, StoreError, DEFAULT_PAGE_SIZE,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct StoredObject {
    content: Bytes,
    created_at: chrono::DateTime<Utc>,
    modified_at: chrono::DateTime<Utc>,
}

struct ContainerState {
    access: ContainerAccess,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

struct CopyState {
    container: String,
    dest_key: String,
    content: Bytes,
    remaining_polls: u32,
    will_fail: bool,
    settled: Option<CopyStatus>,
}

/// An in-memory object store
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    containers: Arc<DashMap<String, Arc<ContainerState>>>,
    copies: Arc<DashMap<CopyId, CopyState>>,
    copy_pending_polls: Arc<AtomicU32>,
    copy_failure_armed: Arc<AtomicBool>,
    delete_failure_armed: Arc<AtomicBool>,
}

impl MemoryObjectStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent copies report `Pending` for `n` status polls before
    /// settling. Defaults to 0 (copies settle immediately).
    pub fn set_copy_pending_polls(&self, n: u32) {
        self.copy_pending_polls.store(n, Ordering::SeqCst);
    }

    /// Make the next copy settle as `Failed` without writing its destination.
    pub fn fail_next_copy(&self) {
        self.copy_failure_armed.store(true, Ordering::SeqCst);
    }

    /// Make the next delete fail with a backend error, leaving the key in
    /// place.
    pub fn fail_next_delete(&self) {
        self.delete_failure_armed.store(true, Ordering::SeqCst);
    }

    /// Access policy a container was created with
    pub fn container_access(&self, name: &str) -> Option<ContainerAccess> {
        self.containers.get(name).map(|c| c.access)
    }

    /// Number of objects currently stored in a container
    pub fn object_count(&self, container: &str) -> usize {
        self.containers
            .get(container)
            .map(|c| c.objects.read().len())
            .unwrap_or(0)
    }

    /// Check whether a key currently exists in a container
    pub fn contains(&self, container: &str, key: &str) -> bool {
        self.containers
            .get(container)
            .map(|c| c.objects.read().contains_key(key))
            .unwrap_or(false)
    }

    fn container(&self, name: &str) -> Result<Arc<ContainerState>> {
        self.containers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| StoreError::ContainerNotFound(name.to_string()))
    }

    fn write_object(state: &ContainerState, key: &str, content: Bytes) -> ObjectInfo {
        let now = Utc::now();
        let mut objects = state.objects.write();
        let created_at = objects.get(key).map(|o| o.created_at).unwrap_or(now);
        objects.insert(
            key.to_string(),
            StoredObject {
                content: content.clone(),
                created_at,
                modified_at: now,
            },
        );
        ObjectInfo {
            key: key.to_string(),
            size: content.len() as u64,
            created_at,
            modified_at: now,
        }
    }

    fn info(key: &str, object: &StoredObject) -> ObjectInfo {
        ObjectInfo {
            key: key.to_string(),
            size: object.content.len() as u64,
            created_at: object.created_at,
            modified_at: object.modified_at,
        }
    }

    fn settle_copy(&self, state: &mut CopyState) -> Result<CopyStatus> {
        let status = if state.will_fail {
            CopyStatus::Failed
        } else {
            let container = self.container(&state.container)?;
            Self::write_object(&container, &state.dest_key, state.content.clone());
            CopyStatus::Succeeded
        };
        state.settled = Some(status);
        Ok(status)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn ensure_container(&self, name: &str, access: ContainerAccess) -> Result<()> {
        self.containers
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(ContainerState {
                    access,
                    objects: RwLock::new(BTreeMap::new()),
                })
            });
        Ok(())
    }

    async fn list(&self, container: &str, request: ListRequest) -> Result<ListPage> {
        let state = self.container(container)?;
        let limit = request.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let start = match &request.token {
            Some(token) => {
                if !token.as_str().starts_with(&request.prefix) {
                    return Err(StoreError::InvalidToken(token.as_str().to_string()));
                }
                token.as_str().to_string()
            }
            None => request.prefix.clone(),
        };

        let objects = state.objects.read();
        let mut items = Vec::new();
        let mut next_token = None;
        // Tracks the group emitted last so the remaining keys of a group are
        // consumed instead of re-emitted.
        let mut last_group: Option<String> = None;

        let range = objects.range::<String, _>((Bound::Included(&start), Bound::Unbounded));
        for (key, object) in range {
            if !key.starts_with(&request.prefix) {
                break;
            }

            let item = match &request.delimiter {
                Some(delimiter) => {
                    let suffix = &key[request.prefix.len()..];
                    match suffix.find(delimiter.as_str()) {
                        Some(pos) => {
                            let group =
                                key[..request.prefix.len() + pos + delimiter.len()].to_string();
                            if last_group.as_deref() == Some(group.as_str()) {
                                continue;
                            }
                            ListItem::CommonPrefix(group)
                        }
                        None => ListItem::Object(Self::info(key, object)),
                    }
                }
                None => ListItem::Object(Self::info(key, object)),
            };

            if items.len() == limit {
                // The page is full and this key starts a new grouped result;
                // resume from it (inclusive) on the next page.
                next_token = Some(PageToken::new(key.clone()));
                break;
            }

            if let ListItem::CommonPrefix(group) = &item {
                last_group = Some(group.clone());
            }
            items.push(item);
        }

        Ok(ListPage { items, next_token })
    }

    async fn head(&self, container: &str, key: &str) -> Result<Option<ObjectInfo>> {
        let state = self.container(container)?;
        let objects = state.objects.read();
        Ok(objects.get(key).map(|object| Self::info(key, object)))
    }

    async fn get(&self, container: &str, key: &str) -> Result<Bytes> {
        let state = self.container(container)?;
        let objects = state.objects.read();
        objects
            .get(key)
            .map(|object| object.content.clone())
            .ok_or_else(|| StoreError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(&self, container: &str, key: &str, content: Bytes) -> Result<ObjectInfo> {
        let state = self.container(container)?;
        Ok(Self::write_object(&state, key, content))
    }

    async fn delete(&self, container: &str, key: &str) -> Result<bool> {
        if self.delete_failure_armed.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend(format!(
                "simulated transient failure deleting {key}"
            )));
        }
        let state = self.container(container)?;
        let existed = state.objects.write().remove(key).is_some();
        Ok(existed)
    }

    async fn copy(&self, container: &str, source_key: &str, dest_key: &str) -> Result<CopyId> {
        let state = self.container(container)?;
        let content = state
            .objects
            .read()
            .get(source_key)
            .map(|object| object.content.clone())
            .ok_or_else(|| StoreError::NotFound {
                container: container.to_string(),
                key: source_key.to_string(),
            })?;

        let id = CopyId::generate();
        let mut copy = CopyState {
            container: container.to_string(),
            dest_key: dest_key.to_string(),
            content,
            remaining_polls: self.copy_pending_polls.load(Ordering::SeqCst),
            will_fail: self.copy_failure_armed.swap(false, Ordering::SeqCst),
            settled: None,
        };
        if copy.remaining_polls == 0 {
            self.settle_copy(&mut copy)?;
        }
        self.copies.insert(id, copy);
        Ok(id)
    }

    async fn copy_status(&self, id: CopyId) -> Result<CopyStatus> {
        let mut entry = self.copies.get_mut(&id).ok_or(StoreError::CopyNotFound(id))?;
        let copy = entry.value_mut();
        if let Some(status) = copy.settled {
            return Ok(status);
        }
        if copy.remaining_polls > 0 {
            copy.remaining_polls -= 1;
            return Ok(CopyStatus::Pending);
        }
        self.settle_copy(copy)
    }
}

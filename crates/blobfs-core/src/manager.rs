//! Caller-facing namespace facade
//!
//! One `FileManager` serves one logical container. The physical container is
//! resolved lazily on first use behind a single-flight guard and reused for
//! the life of the instance; every operation re-derives its answer from the
//! live store state, so there is no cache to invalidate.

use crate::config::NamespaceConfig;
use crate::entry::{DirectoryPage, VirtualEntry};
use crate::{folder, path, rename, stats, validate, walker, CoreError, Result};
use blobfs_store::{ContainerAccess, ObjectStore, PageToken, StoreError};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::instrument;

/// Filesystem-like operations over one container of a flat object store.
///
/// Directory arguments follow the key convention of [`crate::path`]: a
/// directory is either empty (the root) or ends with the delimiter.
pub struct FileManager<S: ObjectStore> {
    store: Arc<S>,
    config: NamespaceConfig,
    container: OnceCell<String>,
}

impl<S: ObjectStore> FileManager<S> {
    /// Create a manager for the container named in `config`. No store call
    /// is made until the first operation.
    pub fn new(store: Arc<S>, config: NamespaceConfig) -> Self {
        Self {
            store,
            config,
            container: OnceCell::new(),
        }
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    /// Resolve the physical container, creating it on first use. Concurrent
    /// first calls collapse into a single `ensure_container` round-trip.
    async fn container(&self) -> Result<&str> {
        self.container
            .get_or_try_init(|| async {
                let name = self.config.physical_container_name();
                let access = if self.config.private {
                    ContainerAccess::Private
                } else {
                    ContainerAccess::Public
                };
                self.store
                    .ensure_container(&name, access)
                    .await
                    .map_err(|source| CoreError::InvalidContainerName {
                        name: self.config.container.clone(),
                        source,
                    })?;
                Ok(name)
            })
            .await
            .map(String::as_str)
    }

    /// Create a file after checking its extension against the allow-list.
    #[instrument(skip(self, content))]
    pub async fn create_file(
        &self,
        directory: &str,
        file_name: &str,
        content: Bytes,
    ) -> Result<VirtualEntry> {
        validate::check_file_name(file_name, &self.config.allowed_extensions)?;
        let container = self.container().await?;
        let key = path::object_key(directory, file_name);
        let info = self.store.put(container, &key, content).await?;
        Ok(VirtualEntry::file(&info))
    }

    /// Fetch a file's metadata.
    #[instrument(skip(self))]
    pub async fn get_file(&self, directory: &str, file_name: &str) -> Result<VirtualEntry> {
        let container = self.container().await?;
        let key = path::object_key(directory, file_name);
        let info = self
            .store
            .head(container, &key)
            .await?
            .ok_or_else(|| CoreError::NotFound(key.clone()))?;
        Ok(VirtualEntry::file(&info))
    }

    /// Fetch a file's content.
    #[instrument(skip(self))]
    pub async fn download_file(&self, directory: &str, file_name: &str) -> Result<Bytes> {
        let container = self.container().await?;
        let key = path::object_key(directory, file_name);
        match self.store.get(container, &key).await {
            Ok(content) => Ok(content),
            Err(StoreError::NotFound { .. }) => Err(CoreError::NotFound(key)),
            Err(error) => Err(error.into()),
        }
    }

    /// Overwrite a file's content. No extension check; the key already
    /// passed it at creation.
    #[instrument(skip(self, content))]
    pub async fn update_file(
        &self,
        directory: &str,
        file_name: &str,
        content: Bytes,
    ) -> Result<VirtualEntry> {
        let container = self.container().await?;
        let key = path::object_key(directory, file_name);
        let info = self.store.put(container, &key, content).await?;
        Ok(VirtualEntry::file(&info))
    }

    /// Delete a file; returns whether the key existed.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, directory: &str, file_name: &str) -> Result<bool> {
        let container = self.container().await?;
        let key = path::object_key(directory, file_name);
        Ok(self.store.delete(container, &key).await?)
    }

    /// Rename a file within a directory via the copy-then-delete protocol.
    #[instrument(skip(self))]
    pub async fn rename_file(
        &self,
        directory: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<VirtualEntry> {
        let container = self.container().await?;
        let source_key = path::object_key(directory, old_name);
        let dest_key = path::object_key(directory, new_name);
        rename::rename(
            self.store.as_ref(),
            container,
            &source_key,
            &dest_key,
            &self.config.rename,
        )
        .await
    }

    /// List every immediate child of a directory.
    #[instrument(skip(self))]
    pub async fn list_directory(&self, directory: &str) -> Result<Vec<VirtualEntry>> {
        let container = self.container().await?;
        walker::list_immediate_children(self.store.as_ref(), container, directory).await
    }

    /// List one page of a directory's immediate children.
    #[instrument(skip(self, token))]
    pub async fn list_directory_paged(
        &self,
        directory: &str,
        page_size: usize,
        token: Option<PageToken>,
    ) -> Result<DirectoryPage> {
        let container = self.container().await?;
        walker::list_page(self.store.as_ref(), container, directory, page_size, token).await
    }

    /// Create a folder under a directory.
    #[instrument(skip(self))]
    pub async fn create_directory(
        &self,
        directory: &str,
        folder_name: &str,
    ) -> Result<VirtualEntry> {
        let container = self.container().await?;
        let prefix = path::object_key(directory, folder_name);
        folder::create_folder(self.store.as_ref(), container, &prefix).await
    }

    /// Delete a folder and everything under it; returns the keys confirmed
    /// deleted.
    #[instrument(skip(self))]
    pub async fn delete_directory(
        &self,
        directory: &str,
        folder_name: &str,
    ) -> Result<Vec<String>> {
        let container = self.container().await?;
        let prefix = path::object_key(directory, folder_name);
        folder::delete_folder(self.store.as_ref(), container, &prefix).await
    }

    /// Compute aggregate statistics for the whole container.
    #[instrument(skip(self))]
    pub async fn container_stats(&self) -> Result<stats::ContainerStats> {
        let container = self.container().await?;
        stats::container_stats(self.store.as_ref(), container, self.config.total_capacity).await
    }
}

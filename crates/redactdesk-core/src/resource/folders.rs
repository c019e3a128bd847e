//! Folder reads and mutations.

use serde::Serialize;
use tracing::{info, warn};

use super::tolerant;
use crate::cache::{CacheKey, ResourceCache, ResourceKind};
use crate::client::ApiClient;
use crate::model::{Folder, FolderId};
use crate::Result;

/// Body of `POST /folders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFolder {
    /// Folder name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Optional description, sent empty when unset.
    #[serde(rename = "Description")]
    pub description: String,
}

/// Folder hook.
#[derive(Debug, Clone)]
pub struct FolderResource {
    client: ApiClient,
    cache: ResourceCache,
}

impl FolderResource {
    /// Creates the hook.
    #[must_use]
    pub const fn new(client: ApiClient, cache: ResourceCache) -> Self {
        Self { client, cache }
    }

    /// Lists every folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self) -> Result<Vec<Folder>> {
        let client = &self.client;
        self.cache
            .fetch(CacheKey::list(ResourceKind::Folders), || async move {
                let folders: Option<Vec<Folder>> = client.get("/folders").await?;
                Ok(folders.unwrap_or_default())
            })
            .await
    }

    /// Drops the cached list and fetches it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refetch(&self) -> Result<Vec<Folder>> {
        self.cache.remove(&CacheKey::list(ResourceKind::Folders)).await;
        self.list().await
    }

    /// Reads one folder; no id means the general inbox.
    ///
    /// Failures are logged and reported as `None`, so callers fall back to
    /// their default header.
    pub async fn get(&self, id: Option<&FolderId>) -> Option<Folder> {
        let id = id
            .filter(|id| !id.as_str().is_empty())
            .cloned()
            .unwrap_or_else(FolderId::general_inbox);
        let key = CacheKey::scoped(ResourceKind::Folders, format!("id/{id}"));
        let client = &self.client;
        let path = format!("/folders/{id}");
        let result = self
            .cache
            .fetch(key, || async move {
                let folder: Option<Folder> = client.get(&path).await?;
                Ok(folder)
            })
            .await;
        match result {
            Ok(folder) => folder,
            Err(e) => {
                warn!("Failed to load folder {}: {}", id, e);
                None
            }
        }
    }

    /// Creates a folder, returning it when the server echoes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, folder: &NewFolder) -> Result<Option<Folder>> {
        let response: serde_json::Value = self.client.post("/folders", folder).await?;
        info!("Created folder {}", folder.name);
        self.cache.invalidate(ResourceKind::Folders).await;
        Ok(tolerant(response))
    }

    /// Deletes a folder. Its messages move to the general inbox server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &FolderId) -> Result<()> {
        self.client.delete(&format!("/folders/{id}")).await?;
        info!("Deleted folder {}", id);
        self.cache
            .invalidate_all(&[ResourceKind::Folders, ResourceKind::Messages])
            .await;
        Ok(())
    }
}

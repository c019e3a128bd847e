//! Message reads, forwarding and CSV export.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{CacheKey, ResourceCache, ResourceKind};
use crate::client::ApiClient;
use crate::model::{CaseId, EmailMessage, FolderId};
use crate::Result;

/// File name given to exported message lists.
pub const EXPORT_FILE_NAME: &str = "exported_messages.csv";

/// Body of `POST /messages/{case_id}/forward`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardRequest {
    /// Recipient addresses.
    pub emails: Vec<String>,
    /// Message being forwarded.
    pub case_id: CaseId,
}

#[derive(Serialize)]
struct ExportRequest<'a> {
    case_id: Vec<&'a str>,
}

/// Lambda-proxy style envelope the export endpoint answers with.
#[derive(Debug, Deserialize)]
struct ExportResponse {
    #[serde(default)]
    body: String,
    #[serde(rename = "isBase64Encoded", default)]
    is_base64_encoded: Option<bool>,
}

/// A decoded export ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested file name.
    pub file_name: String,
    /// CSV bytes.
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Writes the file into `dir`, returning the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!("Saved export to {}", path.display());
        Ok(path)
    }
}

/// Message hook.
#[derive(Debug, Clone)]
pub struct MessageResource {
    client: ApiClient,
    cache: ResourceCache,
}

impl MessageResource {
    /// Creates the hook.
    #[must_use]
    pub const fn new(client: ApiClient, cache: ResourceCache) -> Self {
        Self { client, cache }
    }

    fn list_key(folder: Option<&FolderId>) -> CacheKey {
        match folder {
            Some(folder) => CacheKey::scoped(ResourceKind::Messages, format!("folder/{folder}")),
            None => CacheKey::list(ResourceKind::Messages),
        }
    }

    /// Lists messages, scoped to `folder` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, folder: Option<&FolderId>) -> Result<Vec<EmailMessage>> {
        let path = match folder {
            Some(folder) => format!("/folders/{folder}/messages"),
            None => "/messages".to_string(),
        };
        let client = &self.client;
        self.cache
            .fetch(Self::list_key(folder), || async move {
                let messages: Option<Vec<EmailMessage>> = client.get(&path).await?;
                let messages = messages.unwrap_or_default();
                debug!("Fetched {} messages from {}", messages.len(), path);
                Ok(messages)
            })
            .await
    }

    /// Drops the cached list and fetches it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refetch(&self, folder: Option<&FolderId>) -> Result<Vec<EmailMessage>> {
        self.cache.remove(&Self::list_key(folder)).await;
        self.list(folder).await
    }

    /// Reads one message. With no id, no request is made.
    ///
    /// Single reads are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the message does not exist.
    pub async fn get(&self, case_id: Option<&CaseId>) -> Result<Option<EmailMessage>> {
        let Some(case_id) = case_id.filter(|id| !id.as_str().is_empty()) else {
            return Ok(None);
        };
        let message = self.client.get(&format!("/messages/{case_id}")).await?;
        Ok(Some(message))
    }

    /// Forwards a message to `emails`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn forward(&self, case_id: &CaseId, emails: Vec<String>) -> Result<()> {
        let request = ForwardRequest {
            emails,
            case_id: case_id.clone(),
        };
        let _: serde_json::Value = self
            .client
            .post(&format!("/messages/{case_id}/forward"), &request)
            .await?;
        info!("Forwarded {} to {} recipients", case_id, request.emails.len());
        self.cache.invalidate(ResourceKind::Messages).await;
        Ok(())
    }

    /// Exports the given messages as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not valid base64.
    pub async fn export(&self, case_ids: &[CaseId]) -> Result<ExportedFile> {
        let request = ExportRequest {
            case_id: case_ids.iter().map(CaseId::as_str).collect(),
        };
        let response: ExportResponse = self
            .client
            .post_accepting("/messages/export", &request, "text/csv")
            .await?;

        let bytes = if response.is_base64_encoded == Some(false) {
            response.body.into_bytes()
        } else {
            base64::engine::general_purpose::STANDARD.decode(response.body.trim())?
        };
        info!("Exported {} messages ({} bytes)", case_ids.len(), bytes.len());
        Ok(ExportedFile {
            file_name: EXPORT_FILE_NAME.to_string(),
            bytes,
        })
    }
}

//! Rule reads and mutations.

use serde::Serialize;
use tracing::info;

use super::tolerant;
use crate::cache::{CacheKey, ResourceCache, ResourceKind};
use crate::client::ApiClient;
use crate::model::{FolderId, Rule, RuleId, RuleLineItem};
use crate::Result;

/// Body of `POST /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRule {
    /// Rule description.
    pub description: String,
    /// Folder matching messages move to.
    #[serde(rename = "folderId")]
    pub folder_id: FolderId,
    /// Conditions, already stripped of incomplete items.
    pub criteria: Vec<RuleLineItem>,
}

/// Body of `PATCH /rules/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleRequest {
    /// Rule being changed.
    pub rule_id: RuleId,
    /// New enabled flag.
    pub enabled: bool,
}

/// Rule hook.
#[derive(Debug, Clone)]
pub struct RuleResource {
    client: ApiClient,
    cache: ResourceCache,
}

impl RuleResource {
    /// Creates the hook.
    #[must_use]
    pub const fn new(client: ApiClient, cache: ResourceCache) -> Self {
        Self { client, cache }
    }

    /// Lists every rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self) -> Result<Vec<Rule>> {
        let client = &self.client;
        self.cache
            .fetch(CacheKey::list(ResourceKind::Rules), || async move {
                let rules: Option<Vec<Rule>> = client.get("/rules").await?;
                Ok(rules.unwrap_or_default())
            })
            .await
    }

    /// Drops the cached list and fetches it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refetch(&self) -> Result<Vec<Rule>> {
        self.cache.remove(&CacheKey::list(ResourceKind::Rules)).await;
        self.list().await
    }

    /// Creates a rule.
    ///
    /// New rules may refile existing messages, so folder counts and message
    /// lists are invalidated along with rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, rule: &NewRule) -> Result<Option<Rule>> {
        let response: serde_json::Value = self.client.post("/rules", rule).await?;
        info!("Created rule {} with {} criteria", rule.description, rule.criteria.len());
        self.cache
            .invalidate_all(&[
                ResourceKind::Rules,
                ResourceKind::Folders,
                ResourceKind::Messages,
            ])
            .await;
        Ok(tolerant(response))
    }

    /// Deletes a rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &RuleId) -> Result<()> {
        self.client.delete(&format!("/rules/{id}")).await?;
        info!("Deleted rule {}", id);
        self.cache.invalidate(ResourceKind::Rules).await;
        Ok(())
    }

    /// Enables or disables a rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn toggle(&self, id: &RuleId, enabled: bool) -> Result<Option<Rule>> {
        let request = ToggleRequest {
            rule_id: id.clone(),
            enabled,
        };
        let response: serde_json::Value =
            self.client.patch(&format!("/rules/{id}"), &request).await?;
        info!("Rule {} enabled={}", id, enabled);
        self.cache.invalidate(ResourceKind::Rules).await;
        Ok(tolerant(response))
    }
}

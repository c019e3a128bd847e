//! Resource hooks: fetch and mutate bindings over the shared client and cache.
//!
//! Reads go through the [`ResourceCache`]. A successful mutation invalidates
//! the kinds it affects so the next read refetches; nothing is patched in
//! place and no update is applied optimistically.

mod folders;
mod messages;
mod rules;

pub use folders::{FolderResource, NewFolder};
pub use messages::{EXPORT_FILE_NAME, ExportedFile, ForwardRequest, MessageResource};
pub use rules::{NewRule, RuleResource, ToggleRequest};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::ResourceCache;
use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::Result;

/// The three resource hooks over one client and one cache.
#[derive(Debug, Clone)]
pub struct Resources {
    /// Message reads, forwarding and export.
    pub messages: MessageResource,
    /// Folder reads and mutations.
    pub folders: FolderResource,
    /// Rule reads and mutations.
    pub rules: RuleResource,
    cache: ResourceCache,
}

impl Resources {
    /// Bundles hooks sharing `client` and `cache`.
    #[must_use]
    pub fn new(client: ApiClient, cache: ResourceCache) -> Self {
        Self {
            messages: MessageResource::new(client.clone(), cache.clone()),
            folders: FolderResource::new(client.clone(), cache.clone()),
            rules: RuleResource::new(client, cache.clone()),
            cache,
        }
    }

    /// Builds the client and cache from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = ApiClient::new(config, token)?;
        debug!(
            "API client for {} (authenticated: {})",
            client.base_url(),
            client.is_authenticated()
        );
        Ok(Self::new(client, ResourceCache::new(config.stale_time())))
    }

    /// The shared cache.
    #[must_use]
    pub const fn cache(&self) -> &ResourceCache {
        &self.cache
    }
}

/// Decodes a mutation response, tolerating bodies that are not the record.
///
/// Create and toggle endpoints may echo the record, return a bare message,
/// or return nothing; only the status decides success.
fn tolerant<T: DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value)
        .inspect_err(|e| debug!("Mutation response is not a record: {}", e))
        .ok()
}

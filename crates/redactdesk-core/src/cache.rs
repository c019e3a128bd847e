//! Per-kind cache of resource reads.
//!
//! Entries are keyed by resource kind plus an optional scope (a folder id for
//! folder-scoped message lists). A successful mutation drops every scope of the
//! kinds it affects; entries are never patched in place.
//!
//! Each kind carries a generation that `invalidate` bumps. A load that
//! started before an invalidation does not write its result back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::Result;

/// Resource family a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Message lists.
    Messages,
    /// Folder lists and single folders.
    Folders,
    /// Rule lists.
    Rules,
}

impl ResourceKind {
    /// Stable name used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Folders => "folders",
            Self::Rules => "rules",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Resource family.
    pub kind: ResourceKind,
    /// Optional narrowing, e.g. `folder/{id}`.
    pub scope: Option<String>,
}

impl CacheKey {
    /// Key for the unscoped list of a kind.
    #[must_use]
    pub const fn list(kind: ResourceKind) -> Self {
        Self { kind, scope: None }
    }

    /// Key for a scoped read of a kind.
    #[must_use]
    pub fn scoped(kind: ResourceKind, scope: impl Into<String>) -> Self {
        Self {
            kind,
            scope: Some(scope.into()),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}/{scope}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug)]
struct Entry {
    fetched_at: Instant,
    value: serde_json::Value,
}

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<CacheKey, Entry>,
    generations: HashMap<ResourceKind, u64>,
}

impl Store {
    fn generation(&self, kind: ResourceKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or_default()
    }
}

/// Shared cache of decoded resource reads.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Debug, Clone)]
pub struct ResourceCache {
    store: Arc<RwLock<Store>>,
    stale_time: Duration,
}

impl ResourceCache {
    /// Create an empty cache whose entries stay fresh for `stale_time`.
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            stale_time,
        }
    }

    /// Returns the cached value when present and still fresh.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let store = self.store.read().await;
        let entry = store.entries.get(key)?;
        if entry.fetched_at.elapsed() >= self.stale_time {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Stores a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub async fn put<T: Serialize>(&self, key: CacheKey, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.store.write().await.entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                value,
            },
        );
        Ok(())
    }

    /// Current generation of `kind`; changes on every invalidation.
    pub async fn generation(&self, kind: ResourceKind) -> u64 {
        self.store.read().await.generation(kind)
    }

    /// Stores a value only if `kind` has not been invalidated since
    /// `generation` was read. Returns whether the value was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub async fn put_if_current<T: Serialize>(
        &self,
        key: CacheKey,
        value: &T,
        generation: u64,
    ) -> Result<bool> {
        let value = serde_json::to_value(value)?;
        let mut store = self.store.write().await;
        if store.generation(key.kind) != generation {
            debug!("Not caching {}: invalidated while loading", key);
            return Ok(false);
        }
        store.entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                value,
            },
        );
        Ok(true)
    }

    /// Drops a single entry.
    pub async fn remove(&self, key: &CacheKey) {
        self.store.write().await.entries.remove(key);
    }

    /// Drops every scope of `kind`, forcing the next read to refetch.
    pub async fn invalidate(&self, kind: ResourceKind) {
        let mut store = self.store.write().await;
        *store.generations.entry(kind).or_default() += 1;
        let before = store.entries.len();
        store.entries.retain(|key, _| key.kind != kind);
        debug!(
            "Invalidated {} cached {} entries",
            before - store.entries.len(),
            kind
        );
    }

    /// Invalidates several kinds at once.
    pub async fn invalidate_all(&self, kinds: &[ResourceKind]) {
        for &kind in kinds {
            self.invalidate(kind).await;
        }
    }

    /// Whether a fresh entry exists for `key`.
    pub async fn is_fresh(&self, key: &CacheKey) -> bool {
        self.store
            .read()
            .await
            .entries
            .get(key)
            .is_some_and(|entry| entry.fetched_at.elapsed() < self.stale_time)
    }

    /// Returns the cached value, or runs `load` and caches its result.
    ///
    /// Failed loads are not cached, and neither are loads that overlapped an
    /// invalidation of the same kind.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` fails with.
    pub async fn fetch<T, F, Fut>(&self, key: CacheKey, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(hit);
        }
        let generation = self.generation(key.kind).await;
        let value = load().await?;
        self.put_if_current(key, &value, generation).await?;
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cache() -> ResourceCache {
        ResourceCache::new(Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = cache();
        let key = CacheKey::list(ResourceKind::Folders);
        cache.put(key.clone(), &vec![1, 2, 3]).await.unwrap();
        assert_eq!(cache.get::<Vec<i32>>(&key).await, Some(vec![1, 2, 3]));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get::<Vec<i32>>(&key).await, None);
        assert!(!cache.is_fresh(&key).await);
    }

    #[tokio::test]
    async fn test_invalidate_drops_every_scope() {
        let cache = cache();
        let all = CacheKey::list(ResourceKind::Messages);
        let scoped = CacheKey::scoped(ResourceKind::Messages, "folder/f1");
        let folders = CacheKey::list(ResourceKind::Folders);
        cache.put(all.clone(), &1).await.unwrap();
        cache.put(scoped.clone(), &2).await.unwrap();
        cache.put(folders.clone(), &3).await.unwrap();

        cache.invalidate(ResourceKind::Messages).await;

        assert!(!cache.is_fresh(&all).await);
        assert!(!cache.is_fresh(&scoped).await);
        assert!(cache.is_fresh(&folders).await);
    }

    #[tokio::test]
    async fn test_fetch_loads_once() {
        let cache = cache();
        let key = CacheKey::list(ResourceKind::Rules);

        let first: Vec<String> = cache
            .fetch(key.clone(), || async { Ok(vec!["a".to_string()]) })
            .await
            .unwrap();
        let second: Vec<String> = cache
            .fetch(key.clone(), || async { Ok(vec!["b".to_string()]) })
            .await
            .unwrap();
        assert_eq!(first, second);

        cache.invalidate_all(&[ResourceKind::Rules]).await;
        let third: Vec<String> = cache
            .fetch(key, || async { Ok(vec!["b".to_string()]) })
            .await
            .unwrap();
        assert_eq!(third, vec!["b"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = cache();
        let key = CacheKey::list(ResourceKind::Rules);
        let failed: Result<Vec<String>> = cache
            .fetch(key.clone(), || async { Err(crate::Error::Timeout) })
            .await;
        assert!(failed.is_err());
        assert!(!cache.is_fresh(&key).await);
    }

    #[tokio::test]
    async fn test_load_overlapping_invalidation_is_not_cached() {
        let cache = cache();
        let key = CacheKey::list(ResourceKind::Folders);

        let racing = cache.clone();
        let stale: Vec<String> = cache
            .fetch(key.clone(), || async move {
                racing.invalidate(ResourceKind::Folders).await;
                Ok(vec!["before".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(stale, vec!["before"]);
        assert!(!cache.is_fresh(&key).await);

        let fresh: Vec<String> = cache
            .fetch(key.clone(), || async { Ok(vec!["after".to_string()]) })
            .await
            .unwrap();
        assert_eq!(fresh, vec!["after"]);
        assert!(cache.is_fresh(&key).await);
    }

    #[tokio::test]
    async fn test_put_if_current_checks_generation() {
        let cache = cache();
        let key = CacheKey::list(ResourceKind::Rules);
        let generation = cache.generation(ResourceKind::Rules).await;

        cache.invalidate(ResourceKind::Messages).await;
        assert!(cache.put_if_current(key.clone(), &1, generation).await.unwrap());

        cache.invalidate(ResourceKind::Rules).await;
        assert!(!cache.put_if_current(key, &2, generation).await.unwrap());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CacheKey::list(ResourceKind::Messages).to_string(), "messages");
        assert_eq!(
            CacheKey::scoped(ResourceKind::Messages, "folder/f1").to_string(),
            "messages/folder/f1"
        );
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::Result;
use crate::repository::CacheRepository;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory cache store.
///
/// Expired entries are dropped lazily when they are read.
#[derive(Clone, Default)]
pub struct InMemoryCacheRepository {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns whether `key` holds a live entry.
    pub async fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl CacheRepository for InMemoryCacheRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            tracing::trace!(key, "evicting expired cache entry");
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let entry = CacheEntry {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::CacheKey;
    use crate::repository::CacheRepositoryExt;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct View {
        title: String,
        votes: u32,
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = InMemoryCacheRepository::new();
        cache.set("question:a:details", "{}".into(), None).await.unwrap();

        assert_eq!(
            cache.get("question:a:details").await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn missing_key_is_not_an_error() {
        let cache = InMemoryCacheRepository::new();

        assert!(cache.get("nope").await.unwrap().is_none());
        cache.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let cache = InMemoryCacheRepository::new();
        cache.set("k", "old".into(), None).await.unwrap();
        cache.set("k", "new".into(), None).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_evicted_on_read() {
        let cache = InMemoryCacheRepository::new();
        cache
            .set("k", "v".into(), Some(Duration::from_secs(60)))
            .await
            .unwrap();
        cache.set("forever", "v".into(), None).await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(cache.contains_key("k").await);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.get("k").await.unwrap().is_none());
        assert!(cache.get("forever").await.unwrap().is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn delete_prefix_removes_only_matching_entries() {
        let cache = InMemoryCacheRepository::new();
        let details = CacheKey::new("question", "example", "details");
        let comments = CacheKey::new("question", "example", "comments");
        let other = CacheKey::new("question", "example-two", "details");
        for key in [&details, &comments, &other] {
            cache.set(key.as_str(), "x".into(), None).await.unwrap();
        }

        let removed = cache
            .delete_prefix(&CacheKey::prefix("question", "example"))
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert!(cache.contains_key(other.as_str()).await);
        assert!(!cache.contains_key(details.as_str()).await);
    }

    #[tokio::test]
    async fn json_helpers_round_trip_through_text() {
        let cache = InMemoryCacheRepository::new();
        let view = View {
            title: "Example".into(),
            votes: 3,
        };

        cache.set_json("view", &view, None).await.unwrap();

        assert_eq!(
            cache.get("view").await.unwrap().as_deref(),
            Some(r#"{"title":"Example","votes":3}"#)
        );
        assert_eq!(cache.get_json::<View>("view").await.unwrap(), Some(view));
    }

    #[tokio::test]
    async fn undecodable_json_surfaces_serialization_error() {
        let cache = InMemoryCacheRepository::new();
        cache.set("view", "not json".into(), None).await.unwrap();

        let err = cache.get_json::<View>("view").await.unwrap_err();
        assert!(matches!(err, crate::CacheError::Serialization(_)));
    }
}

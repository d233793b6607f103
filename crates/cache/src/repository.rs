use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;

/// Core trait for cache store implementations.
///
/// The cache is a side channel next to the primary store. Values are opaque
/// text; callers decide the encoding. Deleting a key that does not exist is
/// not an error.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Returns the value stored under `key`, if any and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// With `ttl` set to `None` the entry lives until it is deleted.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// Removes the entry under `key`.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry whose key starts with `prefix` and returns how
    /// many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64>;
}

/// Extension trait storing serde values as JSON text.
#[async_trait]
pub trait CacheRepositoryExt: CacheRepository {
    /// Reads and decodes a JSON value.
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and stores it.
    async fn set_json<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw, ttl).await
    }
}

// Blanket implementation for all CacheRepository implementations
impl<T: CacheRepository + ?Sized> CacheRepositoryExt for T {}

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Backend(#[from] redis::RedisError),
}

/// Outcome of a cache read. `Miss` and `Unavailable` both send the caller
/// back to the database; they only differ in how they get logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(String),
    Miss,
    Unavailable,
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheLookup;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process store used when no redis url is configured.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => CacheLookup::Hit(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                CacheLookup::Miss
            }
            None => CacheLookup::Miss,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        let mut entries = self.entries.lock().await;
        // keys that are never read again would otherwise stay forever
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let mut connection = self.connection.clone();
        match connection.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => CacheLookup::Hit(value),
            Ok(None) => CacheLookup::Miss,
            Err(_) => CacheLookup::Unavailable,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async::<_, ()>(&mut connection)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        connection.del::<_, ()>(key).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Cache whose backend is always down.
    pub struct UnavailableCache;

    #[async_trait]
    impl CacheStore for UnavailableCache {
        async fn get(&self, _key: &str) -> CacheLookup {
            CacheLookup::Unavailable
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::Backend(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            ))))
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::Backend(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            ))))
        }
    }

    #[tokio::test]
    async fn memory_cache_round_trips_until_deleted() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("likes:album-1").await, CacheLookup::Miss);

        cache
            .set("likes:album-1", "3", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get("likes:album-1").await,
            CacheLookup::Hit("3".to_string())
        );

        cache.delete("likes:album-1").await.unwrap();
        assert_eq!(cache.get("likes:album-1").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn memory_cache_entries_expire() {
        let cache = MemoryCache::new();
        cache
            .set("likes:album-1", "3", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("likes:album-1").await, CacheLookup::Miss);
        assert!(cache.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn writing_sweeps_expired_keys_that_are_never_read() {
        let cache = MemoryCache::new();
        for i in 0..100 {
            cache
                .set(&format!("likes:album-{}", i), "0", Duration::from_millis(1))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        cache
            .set("likes:album-fresh", "4", Duration::from_secs(60))
            .await
            .unwrap();
        let entries = cache.entries.lock().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("likes:album-fresh"));
    }

    #[tokio::test]
    async fn deleting_a_missing_key_is_not_an_error() {
        let cache = MemoryCache::new();
        assert!(cache.delete("likes:nothing").await.is_ok());
    }
}

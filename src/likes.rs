use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};

use crate::cache::{CacheLookup, CacheStore};
use crate::error::{ApiError, ApiResult};
use crate::store::{LikeStore, StoreError};

pub const LIKED_MESSAGE: &str = "Berhasil menyukai album";
pub const UNLIKED_MESSAGE: &str = "Batal menyukai album";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeCount {
    pub likes: u64,
    pub from_cache: bool,
}

/// Cache-aside counter for album likes. The database is the source of truth;
/// the cached count is dropped on every like/unlike and rebuilt on the next
/// read.
#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn LikeStore>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

pub fn likes_key(album_id: &str) -> String {
    format!("likes:{}", album_id)
}

impl LikeService {
    pub fn new(store: Arc<dyn LikeStore>, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    async fn ensure_album(&self, album_id: &str) -> ApiResult<()> {
        if !self.store.album_exists(album_id).await? {
            return Err(ApiError::NotFound("Album tidak ditemukan".to_string()));
        }
        Ok(())
    }

    pub async fn like_album(&self, album_id: &str, user_id: &str) -> ApiResult<&'static str> {
        self.ensure_album(album_id).await?;

        if self.store.has_like(album_id, user_id).await? {
            return Err(ApiError::Invariant("Album telah disukai".to_string()));
        }

        // the unique index catches a concurrent like that slipped past the check
        match self.store.insert_like(album_id, user_id).await {
            Ok(0) => return Err(ApiError::Invariant("Gagal menyukai album".to_string())),
            Ok(_) => {}
            Err(StoreError::Duplicate) => {
                return Err(ApiError::Invariant("Album telah disukai".to_string()))
            }
            Err(err) => return Err(err.into()),
        }

        self.invalidate(album_id).await;
        Ok(LIKED_MESSAGE)
    }

    pub async fn unlike_album(&self, album_id: &str, user_id: &str) -> ApiResult<&'static str> {
        self.ensure_album(album_id).await?;

        if self.store.delete_like(album_id, user_id).await? == 0 {
            return Err(ApiError::NotFound("Gagal unlike album".to_string()));
        }

        self.invalidate(album_id).await;
        Ok(UNLIKED_MESSAGE)
    }

    pub async fn get_like_count(&self, album_id: &str) -> ApiResult<LikeCount> {
        let key = likes_key(album_id);
        match self.cache.get(&key).await {
            CacheLookup::Hit(value) => match value.parse::<u64>() {
                Ok(likes) => {
                    return Ok(LikeCount {
                        likes,
                        from_cache: true,
                    })
                }
                Err(_) => warn!("Discarding malformed cached value {:?} for {}", value, key),
            },
            CacheLookup::Miss => debug!("Cache miss for {}", key),
            CacheLookup::Unavailable => warn!("Cache unavailable, counting likes for {}", key),
        }

        let likes = self.store.count_likes(album_id).await?;
        if let Err(err) = self.cache.set(&key, &likes.to_string(), self.ttl).await {
            warn!("Could not cache like count for {}: {}", album_id, err);
        }
        Ok(LikeCount {
            likes,
            from_cache: false,
        })
    }

    /// Drops the cached count. A failed delete leaves a stale value until the
    /// entry expires.
    pub async fn invalidate(&self, album_id: &str) {
        if let Err(err) = self.cache.delete(&likes_key(album_id)).await {
            error!("Could not invalidate like count for {}: {}", album_id, err);
        }
    }
}

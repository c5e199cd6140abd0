use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use entities::playlist;
use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::playlist_song_activity::PlaylistAction;
use entities::song_local_model::SongSummarySqlxModel;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Orm(DbErr),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unique constraint violated")]
    Duplicate,
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate,
            _ => StoreError::Orm(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// `{prefix}-` followed by 16 random alphanumerics.
pub fn new_id(prefix: &str) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("{}-{}", prefix, suffix)
}

/// Persistence needed by the album like counter. Mutations return the number
/// of rows they touched.
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn album_exists(&self, album_id: &str) -> StoreResult<bool>;

    async fn has_like(&self, album_id: &str, user_id: &str) -> StoreResult<bool>;

    async fn insert_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64>;

    async fn delete_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64>;

    async fn count_likes(&self, album_id: &str) -> StoreResult<u64>;
}

/// Persistence needed by the playlist access chain and the playlist listings.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn create_playlist(&self, name: &str, owner: &str) -> StoreResult<String>;

    async fn get_playlist(&self, playlist_id: &str) -> StoreResult<Option<playlist::Model>>;

    async fn playlists_for_owner(&self, owner: &str) -> StoreResult<Vec<PlaylistSqlxModel>>;

    /// Playlist joined with its owner's username.
    async fn playlist_summary(&self, playlist_id: &str) -> StoreResult<Option<PlaylistSqlxModel>>;

    async fn delete_playlist(&self, playlist_id: &str) -> StoreResult<u64>;

    async fn song_exists(&self, song_id: &str) -> StoreResult<bool>;

    async fn insert_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64>;

    async fn delete_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64>;

    async fn playlist_songs(&self, playlist_id: &str) -> StoreResult<Vec<SongSummarySqlxModel>>;

    async fn insert_activity(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> StoreResult<u64>;

    async fn activities(&self, playlist_id: &str) -> StoreResult<Vec<PlaylistActivitySqlxModel>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_random_suffix() {
        let id = new_id("album");
        assert!(id.starts_with("album-"));
        assert_eq!(id.len(), "album-".len() + 16);
        assert_ne!(id, new_id("album"));
    }

    #[test]
    fn other_database_errors_are_kept() {
        let err = StoreError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, StoreError::Orm(_)));
    }
}

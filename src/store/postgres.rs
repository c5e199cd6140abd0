use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    SqlxPostgresConnector,
};
use sqlx::{Pool, Postgres};

use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::playlist_song_activity::PlaylistAction;
use entities::prelude::{Album, Playlist, PlaylistSong, PlaylistSongActivity, Song, UserAlbumLike};
use entities::song_local_model::SongSummarySqlxModel;
use entities::{playlist, playlist_song, playlist_song_activity, user_album_like};

use super::{new_id, LikeStore, PlaylistStore, StoreResult};

/// Postgres-backed store. sea-orm handles single-table work, the `queries`
/// crate handles the joined listings.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
    connection: DatabaseConnection,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        let connection = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
        Self { pool, connection }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl LikeStore for PgStore {
    async fn album_exists(&self, album_id: &str) -> StoreResult<bool> {
        let album = Album::find_by_id(album_id.to_owned())
            .one(&self.connection)
            .await?;
        Ok(album.is_some())
    }

    async fn has_like(&self, album_id: &str, user_id: &str) -> StoreResult<bool> {
        let like = UserAlbumLike::find()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .filter(user_album_like::Column::UserId.eq(user_id))
            .one(&self.connection)
            .await?;
        Ok(like.is_some())
    }

    async fn insert_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64> {
        let like = user_album_like::ActiveModel {
            id: Set(new_id("like")),
            album_id: Set(album_id.to_owned()),
            user_id: Set(user_id.to_owned()),
        };
        let inserted = UserAlbumLike::insert(like)
            .exec_without_returning(&self.connection)
            .await?;
        Ok(inserted)
    }

    async fn delete_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64> {
        let ret = UserAlbumLike::delete_many()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .filter(user_album_like::Column::UserId.eq(user_id))
            .exec(&self.connection)
            .await?;
        Ok(ret.rows_affected)
    }

    async fn count_likes(&self, album_id: &str) -> StoreResult<u64> {
        let count = UserAlbumLike::find()
            .filter(user_album_like::Column::AlbumId.eq(album_id))
            .count(&self.connection)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl PlaylistStore for PgStore {
    async fn create_playlist(&self, name: &str, owner: &str) -> StoreResult<String> {
        let id = new_id("playlist");
        let playlist = playlist::ActiveModel {
            id: Set(id.clone()),
            name: Set(name.to_owned()),
            owner: Set(owner.to_owned()),
        };
        Playlist::insert(playlist)
            .exec_without_returning(&self.connection)
            .await?;
        Ok(id)
    }

    async fn get_playlist(&self, playlist_id: &str) -> StoreResult<Option<playlist::Model>> {
        let playlist = Playlist::find_by_id(playlist_id.to_owned())
            .one(&self.connection)
            .await?;
        Ok(playlist)
    }

    async fn playlists_for_owner(&self, owner: &str) -> StoreResult<Vec<PlaylistSqlxModel>> {
        Ok(queries::get_playlists_by_owner(&self.pool, owner).await?)
    }

    async fn playlist_summary(&self, playlist_id: &str) -> StoreResult<Option<PlaylistSqlxModel>> {
        Ok(queries::get_playlist_by_id(&self.pool, playlist_id).await?)
    }

    async fn delete_playlist(&self, playlist_id: &str) -> StoreResult<u64> {
        let ret = Playlist::delete_by_id(playlist_id.to_owned())
            .exec(&self.connection)
            .await?;
        Ok(ret.rows_affected)
    }

    async fn song_exists(&self, song_id: &str) -> StoreResult<bool> {
        let song = Song::find_by_id(song_id.to_owned())
            .one(&self.connection)
            .await?;
        Ok(song.is_some())
    }

    async fn insert_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64> {
        let item = playlist_song::ActiveModel {
            id: Set(new_id("playlistsong")),
            playlist_id: Set(playlist_id.to_owned()),
            song_id: Set(song_id.to_owned()),
        };
        let inserted = PlaylistSong::insert(item)
            .exec_without_returning(&self.connection)
            .await?;
        Ok(inserted)
    }

    async fn delete_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64> {
        let ret = PlaylistSong::delete_many()
            .filter(playlist_song::Column::PlaylistId.eq(playlist_id))
            .filter(playlist_song::Column::SongId.eq(song_id))
            .exec(&self.connection)
            .await?;
        Ok(ret.rows_affected)
    }

    async fn playlist_songs(&self, playlist_id: &str) -> StoreResult<Vec<SongSummarySqlxModel>> {
        Ok(queries::get_songs_by_playlist_id(&self.pool, playlist_id).await?)
    }

    async fn insert_activity(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> StoreResult<u64> {
        // time and seq are filled in by column defaults
        let activity = playlist_song_activity::ActiveModel {
            id: Set(new_id("activity")),
            playlist_id: Set(playlist_id.to_owned()),
            song_id: Set(song_id.to_owned()),
            user_id: Set(user_id.to_owned()),
            action: Set(action),
            time: NotSet,
            seq: NotSet,
        };
        let inserted = PlaylistSongActivity::insert(activity)
            .exec_without_returning(&self.connection)
            .await?;
        Ok(inserted)
    }

    async fn activities(&self, playlist_id: &str) -> StoreResult<Vec<PlaylistActivitySqlxModel>> {
        Ok(queries::get_playlist_activities(&self.pool, playlist_id).await?)
    }
}

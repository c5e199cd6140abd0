use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::playlist_song_activity::PlaylistAction;
use entities::song_local_model::SongSummarySqlxModel;

use crate::error::{ApiError, ApiResult};
use crate::store::PlaylistStore;

/// Stages of a playlist membership change, in the order they run. A failure
/// aborts the chain where it happened; nothing already done is rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStage {
    Unauthenticated,
    AccessVerified,
    SongVerified,
    MembershipMutated,
    ActivityAppended,
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainStage::Unauthenticated => "unauthenticated",
            ChainStage::AccessVerified => "access verified",
            ChainStage::SongVerified => "song verified",
            ChainStage::MembershipMutated => "membership mutated",
            ChainStage::ActivityAppended => "activity appended",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PlaylistSongs {
    #[serde(flatten)]
    pub(crate) playlist: PlaylistSqlxModel,
    pub(crate) songs: Vec<SongSummarySqlxModel>,
}

#[derive(Clone)]
pub struct PlaylistService {
    store: Arc<dyn PlaylistStore>,
}

impl PlaylistService {
    pub fn new(store: Arc<dyn PlaylistStore>) -> Self {
        Self { store }
    }

    pub async fn add_playlist(&self, name: &str, owner: &str) -> ApiResult<String> {
        let id = self.store.create_playlist(name, owner).await?;
        if id.is_empty() {
            return Err(ApiError::Invariant("Playlist gagal ditambahkan".to_string()));
        }
        Ok(id)
    }

    pub async fn get_playlists(&self, owner: &str) -> ApiResult<Vec<PlaylistSqlxModel>> {
        Ok(self.store.playlists_for_owner(owner).await?)
    }

    pub async fn delete_playlist_by_id(&self, playlist_id: &str) -> ApiResult<()> {
        if self.store.delete_playlist(playlist_id).await? == 0 {
            return Err(ApiError::NotFound(
                "Playlist gagal dihapus. Id tidak ditemukan".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn verify_playlist_owner(&self, playlist_id: &str, user_id: &str) -> ApiResult<()> {
        let playlist = self
            .store
            .get_playlist(playlist_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Playlist tidak ditemukan".to_string()))?;
        if playlist.owner != user_id {
            return Err(ApiError::Authorization(
                "Anda tidak berhak mengakses resource ini".to_string(),
            ));
        }
        Ok(())
    }

    /// Gate for playlist-scoped reads and membership changes. Only the owner
    /// has access.
    pub async fn verify_playlist_access(&self, playlist_id: &str, user_id: &str) -> ApiResult<()> {
        self.verify_playlist_owner(playlist_id, user_id).await
    }

    async fn verify_song(&self, song_id: &str) -> ApiResult<()> {
        if !self.store.song_exists(song_id).await? {
            return Err(ApiError::NotFound("Lagu tidak ditemukan".to_string()));
        }
        Ok(())
    }

    pub async fn add_song_to_playlist(&self, playlist_id: &str, song_id: &str) -> ApiResult<()> {
        if self.store.insert_playlist_song(playlist_id, song_id).await? == 0 {
            return Err(ApiError::Invariant(
                "Lagu gagal ditambahkan ke playlist".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn delete_song_from_playlist(
        &self,
        playlist_id: &str,
        song_id: &str,
    ) -> ApiResult<()> {
        if self.store.delete_playlist_song(playlist_id, song_id).await? == 0 {
            return Err(ApiError::Invariant(
                "Lagu gagal dihapus dari playlist".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn get_songs_from_playlist(&self, playlist_id: &str) -> ApiResult<PlaylistSongs> {
        let playlist = self
            .store
            .playlist_summary(playlist_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Playlist tidak ditemukan".to_string()))?;
        let songs = self.store.playlist_songs(playlist_id).await?;
        Ok(PlaylistSongs { playlist, songs })
    }

    pub async fn add_playlist_activity(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> ApiResult<()> {
        let inserted = self
            .store
            .insert_activity(playlist_id, song_id, user_id, action)
            .await?;
        if inserted == 0 {
            return Err(ApiError::Invariant(
                "Aktivitas playlist gagal ditambahkan".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn get_playlist_activities(
        &self,
        playlist_id: &str,
    ) -> ApiResult<Vec<PlaylistActivitySqlxModel>> {
        Ok(self.store.activities(playlist_id).await?)
    }

    /// Access check, song check, membership insert, then the audit row.
    pub async fn add_song(&self, playlist_id: &str, song_id: &str, user_id: &str) -> ApiResult<()> {
        self.run_chain(playlist_id, song_id, user_id, PlaylistAction::Add)
            .await
    }

    /// Same chain as [`add_song`](Self::add_song) with a membership delete.
    pub async fn remove_song(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
    ) -> ApiResult<()> {
        self.run_chain(playlist_id, song_id, user_id, PlaylistAction::Delete)
            .await
    }

    async fn run_chain(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> ApiResult<()> {
        let mut stage = ChainStage::Unauthenticated;
        let result = self
            .advance(&mut stage, playlist_id, song_id, user_id, action)
            .await;
        if let Err(err) = &result {
            debug!(
                "Playlist {} {} of {} by {} stopped after stage '{}': {}",
                playlist_id,
                action.as_str(),
                song_id,
                user_id,
                stage,
                err
            );
        }
        result
    }

    async fn advance(
        &self,
        stage: &mut ChainStage,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> ApiResult<()> {
        self.verify_playlist_access(playlist_id, user_id).await?;
        *stage = ChainStage::AccessVerified;

        self.verify_song(song_id).await?;
        *stage = ChainStage::SongVerified;

        match action {
            PlaylistAction::Add => self.add_song_to_playlist(playlist_id, song_id).await?,
            PlaylistAction::Delete => self.delete_song_from_playlist(playlist_id, song_id).await?,
        }
        *stage = ChainStage::MembershipMutated;

        self.add_playlist_activity(playlist_id, song_id, user_id, action)
            .await?;
        *stage = ChainStage::ActivityAppended;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn seeded() -> (Arc<MemoryStore>, PlaylistService) {
        let store = Arc::new(MemoryStore::new());
        store.add_user("user-1", "dicoding");
        store.add_user("user-2", "intruder");
        store.add_song("song-1", "Fix You");
        store.add_playlist("playlist-1", "user-1");
        let service = PlaylistService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn owner_check_rejects_strangers_and_missing_playlists() {
        let (_store, service) = seeded();

        assert!(service
            .verify_playlist_owner("playlist-1", "user-1")
            .await
            .is_ok());
        assert!(matches!(
            service.verify_playlist_owner("playlist-1", "user-2").await,
            Err(ApiError::Authorization(_))
        ));
        assert!(matches!(
            service.verify_playlist_owner("playlist-x", "user-1").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn add_then_remove_leaves_two_ordered_activities() {
        let (store, service) = seeded();

        service
            .add_song("playlist-1", "song-1", "user-1")
            .await
            .unwrap();
        assert_eq!(store.membership_count("playlist-1", "song-1"), 1);
        service
            .remove_song("playlist-1", "song-1", "user-1")
            .await
            .unwrap();
        assert_eq!(store.membership_count("playlist-1", "song-1"), 0);

        let activities = service.get_playlist_activities("playlist-1").await.unwrap();
        let actions: Vec<&str> = activities.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(actions, vec!["add", "delete"]);
        assert!(activities
            .iter()
            .all(|a| a.username == "dicoding" && a.title == "Fix You"));
    }

    #[tokio::test]
    async fn stranger_cannot_mutate_and_nothing_is_logged() {
        let (store, service) = seeded();

        let result = service.add_song("playlist-1", "song-1", "user-2").await;
        assert!(matches!(result, Err(ApiError::Authorization(_))));
        assert_eq!(store.membership_count("playlist-1", "song-1"), 0);
        assert!(store.raw_activities().is_empty());
    }

    #[tokio::test]
    async fn unknown_song_stops_before_mutation() {
        let (store, service) = seeded();

        let result = service.add_song("playlist-1", "song-404", "user-1").await;
        match result {
            Err(ApiError::NotFound(message)) => assert_eq!(message, "Lagu tidak ditemukan"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(store.raw_activities().is_empty());
    }

    #[tokio::test]
    async fn removing_absent_song_is_an_invariant_error() {
        let (store, service) = seeded();

        let result = service.remove_song("playlist-1", "song-1", "user-1").await;
        assert!(matches!(result, Err(ApiError::Invariant(_))));
        assert!(store.raw_activities().is_empty());
    }

    #[tokio::test]
    async fn lost_activity_keeps_the_membership_change() {
        let (store, service) = seeded();
        *store.drop_activities.lock().unwrap() = true;

        let result = service.add_song("playlist-1", "song-1", "user-1").await;
        assert!(matches!(result, Err(ApiError::Invariant(_))));
        assert_eq!(store.membership_count("playlist-1", "song-1"), 1);
        assert!(store.raw_activities().is_empty());
    }

    #[tokio::test]
    async fn same_song_can_be_added_twice() {
        let (store, service) = seeded();

        service
            .add_song("playlist-1", "song-1", "user-1")
            .await
            .unwrap();
        service
            .add_song("playlist-1", "song-1", "user-1")
            .await
            .unwrap();
        assert_eq!(store.membership_count("playlist-1", "song-1"), 2);
        assert_eq!(store.raw_activities().len(), 2);
    }

    #[tokio::test]
    async fn playlist_songs_carry_owner_username() {
        let (_store, service) = seeded();
        service
            .add_song("playlist-1", "song-1", "user-1")
            .await
            .unwrap();

        let view = service.get_songs_from_playlist("playlist-1").await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "playlist-1");
        assert_eq!(json["username"], "dicoding");
        assert_eq!(json["songs"][0]["title"], "Fix You");
    }

    #[tokio::test]
    async fn deleting_a_playlist_twice_reports_not_found() {
        let (_store, service) = seeded();

        service.delete_playlist_by_id("playlist-1").await.unwrap();
        assert!(matches!(
            service.delete_playlist_by_id("playlist-1").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lists_only_the_callers_playlists() {
        let (_store, service) = seeded();
        let id = service.add_playlist("Road trip", "user-2").await.unwrap();

        let mine = service.get_playlists("user-2").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, id);
        assert_eq!(mine[0].username, "intruder");
    }
}

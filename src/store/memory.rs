use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use entities::playlist;
use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::playlist_song_activity::PlaylistAction;
use entities::song_local_model::SongSummarySqlxModel;

use super::{new_id, LikeStore, PlaylistStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    albums: HashSet<String>,
    songs: HashMap<String, String>,
    users: HashMap<String, String>,
    likes: Vec<(String, String)>,
    playlists: HashMap<String, playlist::Model>,
    playlist_songs: Vec<(String, String)>,
    activities: Vec<(String, String, String, PlaylistAction)>,
}

/// In-memory stand-in for Postgres. Likes are unique per (album, user) like
/// the real table.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Counts store reads so tests can tell whether the cache was used.
    pub count_queries: Mutex<usize>,
    /// When set, activity inserts report zero rows.
    pub drop_activities: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_album(&self, id: &str) {
        self.tables.lock().unwrap().albums.insert(id.to_string());
    }

    pub fn add_song(&self, id: &str, title: &str) {
        self.tables
            .lock()
            .unwrap()
            .songs
            .insert(id.to_string(), title.to_string());
    }

    pub fn add_user(&self, id: &str, username: &str) {
        self.tables
            .lock()
            .unwrap()
            .users
            .insert(id.to_string(), username.to_string());
    }

    pub fn add_playlist(&self, id: &str, owner: &str) {
        self.tables.lock().unwrap().playlists.insert(
            id.to_string(),
            playlist::Model {
                id: id.to_string(),
                name: "Playlist".to_string(),
                owner: owner.to_string(),
            },
        );
    }

    pub fn membership_count(&self, playlist_id: &str, song_id: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .playlist_songs
            .iter()
            .filter(|(p, s)| p == playlist_id && s == song_id)
            .count()
    }

    pub fn raw_activities(&self) -> Vec<(String, String, String, PlaylistAction)> {
        self.tables.lock().unwrap().activities.clone()
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn album_exists(&self, album_id: &str) -> StoreResult<bool> {
        Ok(self.tables.lock().unwrap().albums.contains(album_id))
    }

    async fn has_like(&self, album_id: &str, user_id: &str) -> StoreResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .likes
            .iter()
            .any(|(a, u)| a == album_id && u == user_id))
    }

    async fn insert_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .likes
            .iter()
            .any(|(a, u)| a == album_id && u == user_id)
        {
            return Err(StoreError::Duplicate);
        }
        tables
            .likes
            .push((album_id.to_string(), user_id.to_string()));
        Ok(1)
    }

    async fn delete_like(&self, album_id: &str, user_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.likes.len();
        tables
            .likes
            .retain(|(a, u)| !(a == album_id && u == user_id));
        Ok((before - tables.likes.len()) as u64)
    }

    async fn count_likes(&self, album_id: &str) -> StoreResult<u64> {
        *self.count_queries.lock().unwrap() += 1;
        let tables = self.tables.lock().unwrap();
        Ok(tables.likes.iter().filter(|(a, _)| a == album_id).count() as u64)
    }
}

#[async_trait]
impl PlaylistStore for MemoryStore {
    async fn create_playlist(&self, name: &str, owner: &str) -> StoreResult<String> {
        let id = new_id("playlist");
        self.tables.lock().unwrap().playlists.insert(
            id.clone(),
            playlist::Model {
                id: id.clone(),
                name: name.to_string(),
                owner: owner.to_string(),
            },
        );
        Ok(id)
    }

    async fn get_playlist(&self, playlist_id: &str) -> StoreResult<Option<playlist::Model>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .playlists
            .get(playlist_id)
            .cloned())
    }

    async fn playlists_for_owner(&self, owner: &str) -> StoreResult<Vec<PlaylistSqlxModel>> {
        let tables = self.tables.lock().unwrap();
        let username = tables.users.get(owner).cloned().unwrap_or_default();
        Ok(tables
            .playlists
            .values()
            .filter(|p| p.owner == owner)
            .map(|p| PlaylistSqlxModel {
                id: p.id.clone(),
                name: p.name.clone(),
                username: username.clone(),
            })
            .collect())
    }

    async fn playlist_summary(&self, playlist_id: &str) -> StoreResult<Option<PlaylistSqlxModel>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.playlists.get(playlist_id).map(|p| PlaylistSqlxModel {
            id: p.id.clone(),
            name: p.name.clone(),
            username: tables.users.get(&p.owner).cloned().unwrap_or_default(),
        }))
    }

    async fn delete_playlist(&self, playlist_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables.playlists.remove(playlist_id).is_some();
        tables.playlist_songs.retain(|(p, _)| p != playlist_id);
        tables.activities.retain(|(p, _, _, _)| p != playlist_id);
        Ok(removed as u64)
    }

    async fn song_exists(&self, song_id: &str) -> StoreResult<bool> {
        Ok(self.tables.lock().unwrap().songs.contains_key(song_id))
    }

    async fn insert_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.playlists.contains_key(playlist_id) {
            return Ok(0);
        }
        tables
            .playlist_songs
            .push((playlist_id.to_string(), song_id.to_string()));
        Ok(1)
    }

    async fn delete_playlist_song(&self, playlist_id: &str, song_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.playlist_songs.len();
        tables
            .playlist_songs
            .retain(|(p, s)| !(p == playlist_id && s == song_id));
        Ok((before - tables.playlist_songs.len()) as u64)
    }

    async fn playlist_songs(&self, playlist_id: &str) -> StoreResult<Vec<SongSummarySqlxModel>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .playlist_songs
            .iter()
            .filter(|(p, _)| p == playlist_id)
            .map(|(_, s)| SongSummarySqlxModel {
                id: s.clone(),
                title: tables.songs.get(s).cloned().unwrap_or_default(),
                performer: "Unknown".to_string(),
            })
            .collect())
    }

    async fn insert_activity(
        &self,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: PlaylistAction,
    ) -> StoreResult<u64> {
        if *self.drop_activities.lock().unwrap() {
            return Ok(0);
        }
        self.tables.lock().unwrap().activities.push((
            playlist_id.to_string(),
            song_id.to_string(),
            user_id.to_string(),
            action,
        ));
        Ok(1)
    }

    async fn activities(&self, playlist_id: &str) -> StoreResult<Vec<PlaylistActivitySqlxModel>> {
        let tables = self.tables.lock().unwrap();
        let now = Utc::now().naive_utc();
        Ok(tables
            .activities
            .iter()
            .filter(|(p, _, _, _)| p == playlist_id)
            .map(|(_, song_id, user_id, action)| PlaylistActivitySqlxModel {
                username: tables.users.get(user_id).cloned().unwrap_or_default(),
                title: tables.songs.get(song_id).cloned().unwrap_or_default(),
                action: action.as_str().to_string(),
                time: now,
            })
            .collect())
    }
}

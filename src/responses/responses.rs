use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::song_local_model::{SongSqlxModel, SongSummarySqlxModel};
use serde::Serialize;

/// `{status, message?, data?}` envelope shared by every endpoint.
#[derive(Serialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub(crate) status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[derive(Serialize, Clone)]
pub struct AlbumIdData {
    #[serde(rename = "albumId")]
    pub(crate) album_id: String,
}

#[derive(Serialize, Clone)]
pub struct SongIdData {
    #[serde(rename = "songId")]
    pub(crate) song_id: String,
}

#[derive(Serialize, Clone)]
pub struct UserIdData {
    #[serde(rename = "userId")]
    pub(crate) user_id: String,
}

#[derive(Serialize, Clone)]
pub struct PlaylistIdData {
    #[serde(rename = "playlistId")]
    pub(crate) playlist_id: String,
}

#[derive(Serialize, Clone)]
pub struct SongsData {
    pub(crate) songs: Vec<SongSummarySqlxModel>,
}

#[derive(Serialize, Clone)]
pub struct SongData {
    pub(crate) song: SongSqlxModel,
}

#[derive(Serialize, Clone)]
pub struct PlaylistsData {
    pub(crate) playlists: Vec<PlaylistSqlxModel>,
}

#[derive(Serialize, Clone)]
pub struct PlaylistData<T> {
    pub(crate) playlist: T,
}

#[derive(Serialize, Clone)]
pub struct ActivitiesData {
    #[serde(rename = "playlistId")]
    pub(crate) playlist_id: String,
    pub(crate) activities: Vec<PlaylistActivitySqlxModel>,
}

#[derive(Serialize, Clone)]
pub struct LikesData {
    pub(crate) likes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Album berhasil dihapus")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "message": "Album berhasil dihapus"})
        );
    }

    #[test]
    fn data_envelope_uses_camel_case_ids() {
        let body = ApiResponse::success(AlbumIdData {
            album_id: "album-abc".to_string(),
        });
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["data"]["albumId"], "album-abc");
        assert!(json.get("message").is_none());
    }
}

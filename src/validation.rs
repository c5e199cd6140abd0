use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use entities::song_local_model::NewSong;

use crate::error::{ApiError, ApiResult};

/// Image types accepted as album covers.
pub const COVER_CONTENT_TYPES: [&str; 6] = [
    "image/apng",
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/webp",
];

pub const MAX_COVER_BYTES: usize = 512_000;

/// Unwraps a JSON body, turning extractor rejections into the 400 envelope.
pub fn json_body<T: DeserializeOwned>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(ApiError::Invariant(rejection.body_text())),
    }
}

fn required_string(field: &str, value: Option<String>) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::Invariant(format!("\"{}\" is required", field))),
    }
}

fn required_year(value: Option<i32>) -> ApiResult<i32> {
    value.ok_or_else(|| ApiError::Invariant("\"year\" is required".to_string()))
}

#[derive(Deserialize)]
pub struct AlbumPayload {
    name: Option<String>,
    year: Option<i32>,
}

pub struct ValidAlbum {
    pub name: String,
    pub year: i32,
}

pub fn validate_album_payload(payload: AlbumPayload) -> ApiResult<ValidAlbum> {
    Ok(ValidAlbum {
        name: required_string("name", payload.name)?,
        year: required_year(payload.year)?,
    })
}

#[derive(Deserialize)]
pub struct SongPayload {
    title: Option<String>,
    year: Option<i32>,
    genre: Option<String>,
    performer: Option<String>,
    duration: Option<i32>,
    #[serde(rename = "albumId")]
    album_id: Option<String>,
}

pub fn validate_song_payload(payload: SongPayload) -> ApiResult<NewSong> {
    Ok(NewSong {
        title: required_string("title", payload.title)?,
        year: required_year(payload.year)?,
        genre: required_string("genre", payload.genre)?,
        performer: required_string("performer", payload.performer)?,
        duration: payload.duration,
        album_id: payload.album_id,
    })
}

#[derive(Deserialize)]
pub struct UserPayload {
    username: Option<String>,
    password: Option<String>,
    fullname: Option<String>,
}

pub struct ValidUser {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

pub fn validate_user_payload(payload: UserPayload) -> ApiResult<ValidUser> {
    Ok(ValidUser {
        username: required_string("username", payload.username)?,
        password: required_string("password", payload.password)?,
        fullname: required_string("fullname", payload.fullname)?,
    })
}

#[derive(Deserialize)]
pub struct PlaylistPayload {
    name: Option<String>,
}

pub fn validate_playlist_payload(payload: PlaylistPayload) -> ApiResult<String> {
    required_string("name", payload.name)
}

#[derive(Deserialize)]
pub struct PlaylistSongPayload {
    #[serde(rename = "songId")]
    song_id: Option<String>,
}

pub fn validate_playlist_song_payload(payload: PlaylistSongPayload) -> ApiResult<String> {
    required_string("songId", payload.song_id)
}

pub fn validate_image_content_type(content_type: Option<&str>) -> ApiResult<()> {
    match content_type {
        Some(content_type) if COVER_CONTENT_TYPES.contains(&content_type) => Ok(()),
        _ => Err(ApiError::Invariant(
            "Berkas harus berupa gambar".to_string(),
        )),
    }
}

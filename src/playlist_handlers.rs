use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Json};

use crate::auth_middleware::AuthenticatedUser;
use crate::error::ApiResult;
use crate::responses::responses::{
    ActivitiesData, ApiResponse, PlaylistData, PlaylistIdData, PlaylistsData,
};
use crate::validation::{
    json_body, validate_playlist_payload, validate_playlist_song_payload, PlaylistPayload,
    PlaylistSongPayload,
};
use crate::AppState;

pub async fn post_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<PlaylistPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let name = validate_playlist_payload(json_body(body)?)?;
    let playlist_id = state.playlists.add_playlist(&name, &user.id).await?;

    Ok(ApiResponse::success_with_message(
        "Playlist berhasil ditambahkan",
        PlaylistIdData { playlist_id },
    )
    .with_status(StatusCode::CREATED))
}

pub async fn get_playlists(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    let playlists = state.playlists.get_playlists(&user.id).await?;
    Ok(ApiResponse::success(PlaylistsData { playlists }).with_status(StatusCode::OK))
}

pub async fn delete_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    state.playlists.verify_playlist_owner(&id, &user.id).await?;
    state.playlists.delete_playlist_by_id(&id).await?;
    Ok(ApiResponse::message("Playlist berhasil dihapus").with_status(StatusCode::OK))
}

pub async fn post_playlist_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<PlaylistSongPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let song_id = validate_playlist_song_payload(json_body(body)?)?;
    state.playlists.add_song(&id, &song_id, &user.id).await?;
    Ok(
        ApiResponse::message("Lagu berhasil ditambahkan ke dalam playlist")
            .with_status(StatusCode::CREATED),
    )
}

pub async fn get_playlist_songs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    state.playlists.verify_playlist_access(&id, &user.id).await?;
    let playlist = state.playlists.get_songs_from_playlist(&id).await?;
    Ok(ApiResponse::success(PlaylistData { playlist }).with_status(StatusCode::OK))
}

pub async fn delete_playlist_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<PlaylistSongPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let song_id = validate_playlist_song_payload(json_body(body)?)?;
    state.playlists.remove_song(&id, &song_id, &user.id).await?;
    Ok(ApiResponse::message("Lagu berhasil dihapus dari playlist").with_status(StatusCode::OK))
}

pub async fn get_playlist_activities(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    state.playlists.verify_playlist_access(&id, &user.id).await?;
    let activities = state.playlists.get_playlist_activities(&id).await?;
    Ok(ApiResponse::success(ActivitiesData {
        playlist_id: id,
        activities,
    })
    .with_status(StatusCode::OK))
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use log::info;
use sea_orm::ActiveValue::Set;
use sea_orm::EntityTrait;
use serde::Deserialize;

use entities::prelude::User;
use entities::user;

use crate::auth_middleware::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::responses::album_response::AlbumResponse;
use crate::responses::responses::{
    AlbumIdData, ApiResponse, LikesData, SongData, SongIdData, SongsData, UserIdData,
};
use crate::store::{new_id, StoreError};
use crate::validation::{
    json_body, validate_album_payload, validate_image_content_type, validate_song_payload,
    validate_user_payload, AlbumPayload, SongPayload, UserPayload, MAX_COVER_BYTES,
};
use crate::AppState;

pub const DATA_SOURCE_HEADER: &str = "x-data-source";

#[derive(Deserialize)]
pub struct SongSearchQuery {
    title: Option<String>,
    performer: Option<String>,
}

pub async fn post_album(
    State(state): State<AppState>,
    body: Result<Json<AlbumPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let album = validate_album_payload(json_body(body)?)?;
    let album_id = new_id("album");

    if queries::add_album(state.store.pool(), &album_id, &album.name, album.year).await? == 0 {
        return Err(ApiError::Invariant("Gagal menambahkan album".to_string()));
    }

    Ok(
        ApiResponse::success_with_message("Album berhasil ditambahkan", AlbumIdData { album_id })
            .with_status(StatusCode::CREATED),
    )
}

pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let album = queries::get_album_by_id(state.store.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Album tidak ditemukan".to_string()))?;
    let songs = queries::get_songs_by_album_id(state.store.pool(), &album.id).await?;

    Ok(ApiResponse::success(AlbumResponse::from_album(album, songs)).with_status(StatusCode::OK))
}

pub async fn put_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AlbumPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let album = validate_album_payload(json_body(body)?)?;

    if queries::edit_album_by_id(state.store.pool(), &id, &album.name, album.year).await? == 0 {
        return Err(ApiError::NotFound(
            "Gagal memperbarui album. Id tidak ditemukan".to_string(),
        ));
    }
    Ok(ApiResponse::message("Album berhasil diperbarui").with_status(StatusCode::OK))
}

pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    if queries::delete_album_by_id(state.store.pool(), &id).await? == 0 {
        return Err(ApiError::NotFound(
            "Gagal menghapus album. Id tidak ditemukan".to_string(),
        ));
    }
    // likes went with the album
    state.likes.invalidate(&id).await;
    Ok(ApiResponse::message("Album berhasil dihapus").with_status(StatusCode::OK))
}

pub async fn post_album_cover(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    if queries::get_album_by_id(state.store.pool(), &id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Album tidak ditemukan".to_string()));
    }

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("cover") {
            continue;
        }
        validate_image_content_type(field.content_type())?;
        let original_name = field.file_name().map(str::to_owned);
        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > MAX_COVER_BYTES {
            return Err(ApiError::PayloadTooLarge(
                "Ukuran sampul terlalu besar".to_string(),
            ));
        }

        let filename = state
            .covers
            .write_file(original_name.as_deref(), &data)
            .await?;
        let cover_url = format!("{}/upload/images/{}", state.public_url, filename);
        if queries::update_album_cover(state.store.pool(), &id, &cover_url).await? == 0 {
            return Err(ApiError::NotFound(
                "Gagal memperbarui sampul album. Id tidak ditemukan".to_string(),
            ));
        }
        info!("Album {} cover set to {}", id, cover_url);
        return Ok(ApiResponse::message("Sampul berhasil diunggah").with_status(StatusCode::CREATED));
    }

    Err(ApiError::Invariant("\"cover\" is required".to_string()))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::Invariant(err.body_text())
    }
}

pub async fn post_album_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    let message = state.likes.like_album(&id, &user.id).await?;
    Ok(ApiResponse::message(message).with_status(StatusCode::CREATED))
}

pub async fn delete_album_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Response> {
    let message = state.likes.unlike_album(&id, &user.id).await?;
    Ok(ApiResponse::message(message).with_status(StatusCode::OK))
}

pub async fn get_album_likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let count = state.likes.get_like_count(&id).await?;
    let mut response =
        ApiResponse::success(LikesData { likes: count.likes }).with_status(StatusCode::OK);
    if count.from_cache {
        response.headers_mut().insert(
            HeaderName::from_static(DATA_SOURCE_HEADER),
            HeaderValue::from_static("cache"),
        );
    }
    Ok(response)
}

pub async fn post_song(
    State(state): State<AppState>,
    body: Result<Json<SongPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let song = validate_song_payload(json_body(body)?)?;
    let song_id = new_id("song");

    if queries::add_song(state.store.pool(), &song_id, &song).await? == 0 {
        return Err(ApiError::Invariant("Lagu gagal ditambahkan".to_string()));
    }
    Ok(
        ApiResponse::success_with_message("Lagu berhasil ditambahkan", SongIdData { song_id })
            .with_status(StatusCode::CREATED),
    )
}

pub async fn get_songs(
    State(state): State<AppState>,
    Query(query): Query<SongSearchQuery>,
) -> ApiResult<Response> {
    let songs = queries::search_songs(
        state.store.pool(),
        query.title.as_deref().filter(|t| !t.is_empty()),
        query.performer.as_deref().filter(|p| !p.is_empty()),
    )
    .await?;
    Ok(ApiResponse::success(SongsData { songs }).with_status(StatusCode::OK))
}

pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let song = queries::get_song_by_id(state.store.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Lagu tidak ditemukan".to_string()))?;
    Ok(ApiResponse::success(SongData { song }).with_status(StatusCode::OK))
}

pub async fn put_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SongPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let song = validate_song_payload(json_body(body)?)?;
    if queries::edit_song_by_id(state.store.pool(), &id, &song).await? == 0 {
        return Err(ApiError::NotFound(
            "Gagal memperbarui lagu. Id tidak ditemukan".to_string(),
        ));
    }
    Ok(ApiResponse::message("Lagu berhasil diperbarui").with_status(StatusCode::OK))
}

pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    if queries::delete_song_by_id(state.store.pool(), &id).await? == 0 {
        return Err(ApiError::NotFound(
            "Gagal menghapus lagu. Id tidak ditemukan".to_string(),
        ));
    }
    Ok(ApiResponse::message("Lagu berhasil dihapus").with_status(StatusCode::OK))
}

pub async fn post_user(
    State(state): State<AppState>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let payload = validate_user_payload(json_body(body)?)?;
    let user_id = new_id("user");
    let user = user::ActiveModel {
        id: Set(user_id.clone()),
        username: Set(payload.username),
        password: Set(payload.password),
        fullname: Set(payload.fullname),
    };

    match User::insert(user)
        .exec_without_returning(state.store.connection())
        .await
        .map_err(StoreError::from)
    {
        Ok(_) => {}
        Err(StoreError::Duplicate) => {
            return Err(ApiError::Invariant(
                "Gagal menambahkan user. Username sudah digunakan".to_string(),
            ))
        }
        Err(err) => return Err(err.into()),
    }

    Ok(
        ApiResponse::success_with_message("User berhasil ditambahkan", UserIdData { user_id })
            .with_status(StatusCode::CREATED),
    )
}

pub async fn not_found() -> impl IntoResponse {
    ApiError::NotFound("Resource tidak ditemukan".to_string())
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use thiserror::Error;

use crate::responses::responses::ApiResponse;
use crate::store::StoreError;

pub const SERVER_FAILURE_MESSAGE: &str = "Maaf, terjadi kegagalan pada server kami.";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Invariant(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Invariant(_) => StatusCode::BAD_REQUEST,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Store(StoreError::Duplicate) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        ApiError::Store(StoreError::from(err))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Store(StoreError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Unhandled error: {}", self);
            let body = ApiResponse::<()>::error(SERVER_FAILURE_MESSAGE);
            return (status, Json(body)).into_response();
        }
        let message = match self {
            ApiError::Store(StoreError::Duplicate) => "Data sudah ada".to_string(),
            other => other.to_string(),
        };
        (status, Json(ApiResponse::<()>::fail(message))).into_response()
    }
}

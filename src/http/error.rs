use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;
use crate::http::MessageResponse;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Album not found")]
    AlbumNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("photo file is required")]
    MissingPhoto,

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("failed to save file")]
    FileWrite(#[source] std::io::Error),

    #[error("an error occurred with the database: {0}")]
    DbErr(#[from] tokio_rusqlite::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlbumNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::MissingPhoto => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::FileWrite(_) | Self::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            Self::AlbumNotFound => {
                return (status, Json(MessageResponse::new(self.to_string()))).into_response();
            }

            Self::Multipart(ref e) => e.body_text(),

            Self::FileWrite(ref e) => {
                error!("File write error: {:?}", e);
                self.to_string()
            }

            Self::DbErr(ref e) => {
                error!("Database error: {:?}", e);
                "database error".to_string()
            }

            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

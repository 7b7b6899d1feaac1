use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Extension, Multipart, Path};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use crate::db::entities::{NewPhoto, Photo};
use crate::http::{ApiContext, ApiError, Result, UPLOADS_ROUTE};
use crate::utils::str_utils::StringExtensions;

/// Multipart field that carries the uploaded file.
const PHOTO_FIELD: &str = "photo";

pub fn router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/albums/:id/photos", get(get_photos_by_album).post(upload_photo))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

struct UploadedFile {
    original_filename: String,
    data: Vec<u8>,
}

impl UploadedFile {
    /// Takes the first part named `photo` that carries a filename.
    async fn try_from(mut multipart: Multipart) -> Result<Self> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(PHOTO_FIELD) {
                continue;
            }
            let Some(original_filename) = field.file_name().filter(|x| !x.is_empty()).map(str::to_string) else {
                continue;
            };
            let data = field.bytes().await?.to_vec();
            return Ok(Self { original_filename, data });
        }
        Err(ApiError::MissingPhoto)
    }

    /// Client filename without any directory components.
    fn title(&self) -> String {
        self.original_filename.base_filename().to_string()
    }

    fn stored_filename(&self, album_id: i64) -> String {
        format!("{}_{}", album_id, self.title())
    }
}

async fn get_photos_by_album(
    ctx: Extension<ApiContext>,
    Path(album_id): Path<String>,
) -> Result<Json<Vec<Photo>>> {
    let album_id = album_id.parse_id_or_default();
    let photos = Photo::get_by_album(album_id, &ctx.db).await?;
    Ok(Json(photos))
}

async fn upload_photo(
    ctx: Extension<ApiContext>,
    Path(album_id): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Photo>)> {
    let album_id = album_id.parse_id_or_default();
    let multipart = multipart.map_err(|_| ApiError::MissingPhoto)?;
    let file = UploadedFile::try_from(multipart).await?;

    let stored_filename = file.stored_filename(album_id);
    let destination = ctx.cfg.upload_dir.join(&stored_filename);
    tokio::fs::write(&destination, &file.data)
        .await
        .map_err(ApiError::FileWrite)?;
    info!("stored {} bytes at {}", file.data.len(), destination.display());

    let photo = NewPhoto {
        album_id,
        title: file.title(),
        url: format!("{UPLOADS_ROUTE}/{stored_filename}"),
    };
    let photo = Photo::insert(photo, &ctx.db).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(name: &str) -> UploadedFile {
        UploadedFile { original_filename: name.to_string(), data: Vec::new() }
    }

    #[test]
    fn test_stored_filename() {
        assert_eq!(uploaded("beach.jpg").stored_filename(1), "1_beach.jpg");
        assert_eq!(uploaded("../../evil.jpg").stored_filename(7), "7_evil.jpg");
        assert_eq!(uploaded("..\\evil.jpg").stored_filename(0), "0_evil.jpg");
    }

    #[test]
    fn test_title_drops_directories() {
        assert_eq!(uploaded("beach.jpg").title(), "beach.jpg");
        assert_eq!(uploaded("../../evil.jpg").title(), "evil.jpg");
        assert_eq!(uploaded("C:\\photos\\beach.jpg").title(), "beach.jpg");
    }
}

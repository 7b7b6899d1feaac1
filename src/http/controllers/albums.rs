use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use crate::db::entities::{Album, Photo};
use crate::http::{ApiContext, ApiError, MessageResponse, Result};
use crate::utils::str_utils::StringExtensions;

pub fn router() -> Router {
    Router::new()
        .route("/albums", get(get_albums).post(create_album))
        .route("/albums/:id", get(get_album).put(update_album).delete(delete_album))
}

#[derive(serde::Deserialize, Debug, Default)]
struct AlbumBody {
    #[serde(default)]
    title: Option<String>,
}

async fn get_albums(
    ctx: Extension<ApiContext>,
) -> Result<Json<Vec<Album>>> {
    let albums = Album::get_all(&ctx.db).await?;
    Ok(Json(albums))
}

async fn get_album(
    ctx: Extension<ApiContext>,
    Path(album_id): Path<String>,
) -> Result<Json<Album>> {
    let album_id = album_id.parse_id_or_default();
    let album = Album::get_by_id(album_id, &ctx.db)
        .await?
        .ok_or(ApiError::AlbumNotFound)?;
    Ok(Json(album))
}

async fn create_album(
    ctx: Extension<ApiContext>,
    body: std::result::Result<Json<AlbumBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Album>)> {
    let Json(req) = body?;
    let album = Album::insert(req.title.unwrap_or_default(), &ctx.db).await?;
    info!("album {} created", album.id);
    Ok((StatusCode::CREATED, Json(album)))
}

async fn update_album(
    ctx: Extension<ApiContext>,
    Path(album_id): Path<String>,
    body: std::result::Result<Json<AlbumBody>, JsonRejection>,
) -> Result<Json<Album>> {
    let album_id = album_id.parse_id_or_default();
    let mut album = Album::get_by_id(album_id, &ctx.db)
        .await?
        .ok_or(ApiError::AlbumNotFound)?;

    let Json(req) = body?;
    album.title = req.title.unwrap_or_default();
    let album = Album::update(album, &ctx.db)
        .await?
        .ok_or(ApiError::AlbumNotFound)?;
    Ok(Json(album))
}

async fn delete_album(
    ctx: Extension<ApiContext>,
    Path(album_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let album_id = album_id.parse_id_or_default();
    let deleted_photos = Photo::delete_by_album(album_id, &ctx.db).await?;
    let deleted_albums = Album::delete_by_id(album_id, &ctx.db).await?;
    if deleted_albums == 0 {
        return Err(ApiError::AlbumNotFound);
    }

    info!("album {} deleted with {} photos", album_id, deleted_photos);
    Ok(Json(MessageResponse::new("Album deleted")))
}

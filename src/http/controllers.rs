use axum::Router;

pub mod albums;
pub mod photos;
pub mod ping;

pub fn router(max_upload_bytes: usize) -> Router {
    ping::router()
        .merge(albums::router())
        .merge(photos::router(max_upload_bytes))
}

use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN};
use axum::http::Method;
use axum::{Extension, Router};
use std::sync::Arc;
use tokio_rusqlite::Connection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
pub use error::ApiError;
use crate::config::AppConfig;

mod error;
mod controllers;

/// Url prefix under which the upload directory is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Clone)]
pub struct ApiContext {
    pub cfg: Arc<AppConfig>,
    pub db: Connection,
}

impl ApiContext {
    pub fn new(config: AppConfig, db: Connection) -> Self {
        Self {
            cfg: Arc::new(config),
            db,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub fn router(ctx: ApiContext) -> Router {
    let upload_dir = ctx.cfg.upload_dir.clone();
    controllers::router(ctx.cfg.max_upload_bytes)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(upload_dir))
        .layer(cors_layer())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(ctx))
                .layer(TraceLayer::new_for_http()),
        )
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([ORIGIN, CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([CONTENT_LENGTH])
}

pub async fn serve(ctx: ApiContext) -> anyhow::Result<()> {
    let addr = ctx.cfg.addr;
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("listening on {}", &addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running HTTP server")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

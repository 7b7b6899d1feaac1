use std::path::Path;
use anyhow::Context;
use tokio_rusqlite::Connection;
use tracing::info;
use crate::db::entities::{Album, Photo};

pub mod entities;

pub type DbResult<T> = Result<T, tokio_rusqlite::Error>;

pub async fn open(db_path: &Path) -> anyhow::Result<Connection> {
    info!("opening database at {}", db_path.display());
    Connection::open(db_path)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

pub async fn migrate(db: &Connection) -> DbResult<()> {
    info!("Starting DB migration...");
    Album::migrate(db).await?;
    Photo::migrate(db).await?;
    info!("DB Migrated!");
    Ok(())
}

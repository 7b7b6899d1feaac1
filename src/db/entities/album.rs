use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;
use crate::db::DbResult;
use crate::db::entities::Album;

impl Album {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
        })
    }

    pub async fn get_all(db: &Connection) -> DbResult<Vec<Album>> {
        db.call(|conn| {
            let mut stmt = conn.prepare("SELECT id, title FROM albums ORDER BY id;")?;
            let albums = stmt
                .query_map([], Album::from_row)?
                .collect::<rusqlite::Result<Vec<Album>>>()?;
            Ok(albums)
        }).await
    }

    pub async fn get_by_id(id: i64, db: &Connection) -> DbResult<Option<Album>> {
        db.call(move |conn| {
            let maybe_album = conn
                .query_row("SELECT id, title FROM albums WHERE id = ?1;", params![id], Album::from_row)
                .optional()?;
            Ok(maybe_album)
        }).await
    }

    pub async fn insert(title: String, db: &Connection) -> DbResult<Album> {
        db.call(move |conn| {
            let album = conn.query_row(
                "INSERT INTO albums (title) VALUES (?1) RETURNING id, title;",
                params![title],
                Album::from_row,
            )?;
            Ok(album)
        }).await
    }

    /// Saves the whole record. Returns `None` when no row has that id.
    pub async fn update(album: Album, db: &Connection) -> DbResult<Option<Album>> {
        db.call(move |conn| {
            let affected = conn.execute("UPDATE albums SET title = ?1 WHERE id = ?2;", params![album.title, album.id])?;
            Ok((affected > 0).then_some(album))
        }).await
    }

    /// Returns the number of deleted rows, `0` when the album did not exist.
    pub async fn delete_by_id(id: i64, db: &Connection) -> DbResult<usize> {
        db.call(move |conn| {
            let affected = conn.execute("DELETE FROM albums WHERE id = ?1;", params![id])?;
            Ok(affected)
        }).await
    }

    pub async fn migrate(db: &Connection) -> DbResult<()> {
        db.call(|conn| {
            conn.execute_batch("CREATE TABLE IF NOT EXISTS albums (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL
);")?;
            Ok(())
        }).await
    }
}

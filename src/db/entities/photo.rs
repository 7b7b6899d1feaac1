use rusqlite::{params, Row};
use tokio_rusqlite::Connection;
use crate::db::DbResult;
use crate::db::entities::{NewPhoto, Photo};

impl Photo {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            album_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
        })
    }

    pub async fn get_by_album(album_id: i64, db: &Connection) -> DbResult<Vec<Photo>> {
        db.call(move |conn| {
            let mut stmt = conn.prepare("SELECT id, album_id, title, url FROM photos WHERE album_id = ?1 ORDER BY id;")?;
            let photos = stmt
                .query_map(params![album_id], Photo::from_row)?
                .collect::<rusqlite::Result<Vec<Photo>>>()?;
            Ok(photos)
        }).await
    }

    pub async fn insert(photo: NewPhoto, db: &Connection) -> DbResult<Photo> {
        db.call(move |conn| {
            let photo = conn.query_row(
                "INSERT INTO photos (album_id, title, url) VALUES (?1, ?2, ?3) RETURNING id, album_id, title, url;",
                params![photo.album_id, photo.title, photo.url],
                Photo::from_row,
            )?;
            Ok(photo)
        }).await
    }

    /// Deletes every photo of an album, whether or not the album itself exists.
    pub async fn delete_by_album(album_id: i64, db: &Connection) -> DbResult<usize> {
        db.call(move |conn| {
            let affected = conn.execute("DELETE FROM photos WHERE album_id = ?1;", params![album_id])?;
            Ok(affected)
        }).await
    }

    pub async fn migrate(db: &Connection) -> DbResult<()> {
        db.call(|conn| {
            conn.execute_batch("CREATE TABLE IF NOT EXISTS photos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    album_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    url TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_photos_album_id ON photos (album_id);")?;
            Ok(())
        }).await
    }
}

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::model::Favorite;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS favorites (
    id       TEXT PRIMARY KEY,
    title    TEXT NOT NULL,
    thumb    TEXT,
    source   TEXT,
    saved_at TEXT NOT NULL
)";

/// Persistent favorites collection, one SQLite connection behind a mutex.
///
/// Every operation is a single statement; concurrent requests are serialized
/// by the lock and by whatever locking SQLite itself performs.
pub struct FavoritesStore {
    conn: Mutex<Connection>,
}

impl FavoritesStore {
    /// Open the database file, creating its directory, the file and the
    /// `favorites` table on first run.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])?;
        Ok(FavoritesStore {
            conn: Mutex::new(conn),
        })
    }

    /// All favorites, newest save first.
    pub fn list(&self) -> Result<Vec<Favorite>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, title, thumb, source, saved_at FROM favorites ORDER BY saved_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Favorite {
                id: row.get(0)?,
                title: row.get(1)?,
                thumb: row.get(2)?,
                source: row.get(3)?,
                saved_at: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert a favorite, or overwrite title/thumb/source when the id is
    /// already saved. `saved_at` keeps its original value on conflict, so
    /// re-saving does not move a favorite up the list.
    pub fn upsert(
        &self,
        id: &str,
        title: &str,
        thumb: &str,
        source: &str,
    ) -> Result<(), StoreError> {
        if id.is_empty() || title.is_empty() {
            return Err(StoreError::Validation("id and title required".to_string()));
        }

        // RFC 3339 UTC with fixed-width microseconds so the textual
        // ORDER BY in list() is chronological.
        let saved_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.conn.lock().execute(
            "INSERT INTO favorites (id, title, thumb, source, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (id) DO UPDATE SET
               title  = excluded.title,
               thumb  = excluded.thumb,
               source = excluded.source",
            params![id, title, thumb, source, saved_at],
        )?;

        Ok(())
    }

    /// Rename a favorite. Unknown ids are a silent no-op.
    pub fn update_title(&self, id: &str, title: &str) -> Result<(), StoreError> {
        if title.is_empty() {
            return Err(StoreError::Validation("title required".to_string()));
        }

        self.conn.lock().execute(
            "UPDATE favorites SET title = ?1 WHERE id = ?2",
            params![title, id],
        )?;

        Ok(())
    }

    /// Delete a favorite. Unknown ids are a silent no-op.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .lock()
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])?;

        Ok(())
    }
}

use crate::Database;
use crate::models::{UserRow, VideoRow};
use anyhow::Result;
use rusqlite::{Connection, ErrorCode, Row};

impl Database {
    // -- Users --

    /// Insert a user. Returns `false` without touching the existing row when
    /// the username is already taken.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            if query_user_by_username(conn, username)?.is_some() {
                return Ok(false);
            }

            match conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            ) {
                Ok(_) => Ok(true),
                // Another writer on the same file got there first.
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Videos --

    pub fn insert_video(&self, name: &str, duration: &str) -> Result<VideoRow> {
        self.with_conn_mut(|conn| {
            let row = conn.query_row(
                "INSERT INTO videos (name, duration) VALUES (?1, ?2)
                 RETURNING id, name, duration, upload_date",
                (name, duration),
                video_from_row,
            )?;
            Ok(row)
        })
    }

    /// Newest first; equal timestamps fall back to the most recent insert.
    pub fn list_videos(&self) -> Result<Vec<VideoRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, duration, upload_date
                 FROM videos
                 ORDER BY upload_date DESC, id DESC",
            )?;

            let rows = stmt
                .query_map([], video_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Returns `true` if a row was removed. A missing id is not an error.
    pub fn delete_video(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM videos WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT username, password_hash FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password_hash: row.get(1)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn video_from_row(row: &Row<'_>) -> rusqlite::Result<VideoRow> {
    Ok(VideoRow {
        id: row.get(0)?,
        name: row.get(1)?,
        duration: row.get(2)?,
        upload_date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

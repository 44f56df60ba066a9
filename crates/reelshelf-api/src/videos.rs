use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{info, warn};

use reelshelf_db::Database;
use reelshelf_db::models::VideoRow;
use reelshelf_types::models::Video;

use crate::error::Result;

pub struct VideoCatalog {
    db: Arc<Database>,
}

impl VideoCatalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All videos, most recently uploaded first.
    pub fn list_videos(&self) -> Result<Vec<Video>> {
        let rows = self.db.list_videos()?;
        Ok(rows.into_iter().map(video_from_row).collect())
    }

    /// Name and duration are stored as given, empty strings included.
    pub fn add_video(&self, name: &str, duration: &str) -> Result<Video> {
        let row = self.db.insert_video(name, duration)?;
        info!("Added video {} '{}'", row.id, row.name);
        Ok(video_from_row(row))
    }

    pub fn delete_video(&self, id: i64) -> Result<bool> {
        let removed = self.db.delete_video(id)?;
        if removed {
            info!("Deleted video {}", id);
        }
        Ok(removed)
    }
}

fn video_from_row(row: VideoRow) -> Video {
    let upload_date = parse_upload_date(&row.upload_date).unwrap_or_else(|| {
        warn!("Corrupt upload_date '{}' on video {}", row.upload_date, row.id);
        DateTime::default()
    });

    Video {
        id: row.id,
        name: row.name,
        duration: row.duration,
        upload_date,
    }
}

/// SQLite's `CURRENT_TIMESTAMP` is "YYYY-MM-DD HH:MM:SS" in UTC without a zone.
/// RFC 3339 is accepted too for rows written by other tools.
fn parse_upload_date(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

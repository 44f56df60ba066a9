use chrono::{DateTime, Utc};

/// A catalog entry. Only metadata is kept; there is no video file behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: i64,
    pub name: String,
    /// Free-form, e.g. "2:30". Not validated.
    pub duration: String,
    pub upload_date: DateTime<Utc>,
}

/// Database row types. These map directly to SQLite rows and are kept
/// apart from the reelshelf-types models.

pub struct UserRow {
    pub username: String,
    pub password_hash: String,
}

pub struct VideoRow {
    pub id: i64,
    pub name: String,
    pub duration: String,
    /// `CURRENT_TIMESTAMP` text, `YYYY-MM-DD HH:MM:SS` in UTC. Empty when NULL.
    pub upload_date: String,
}

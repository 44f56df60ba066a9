use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let db_path = env::var("REELSHELF_DB_PATH")
            .unwrap_or_else(|_| "video_db.sqlite3".into())
            .into();
        // Loopback by default: this is a local, single-user session.
        let host = env::var("REELSHELF_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = env::var("REELSHELF_PORT")
            .unwrap_or_else(|_| "8501".into())
            .parse()
            .context("REELSHELF_PORT must be a port number")?;

        Ok(Self { db_path, host, port })
    }
}

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use reelshelf_db::Database;

use crate::error::{ApiError, Result};

/// Persists username/password-hash pairs and checks login attempts.
pub struct CredentialStore {
    db: Arc<Database>,
    hasher: Argon2<'static>,
}

impl CredentialStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_hasher(db, Argon2::default())
    }

    pub fn with_hasher(db: Arc<Database>, hasher: Argon2<'static>) -> Self {
        Self { db, hasher }
    }

    pub fn create_user(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(ApiError::InvalidInput("Username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(ApiError::InvalidInput("Password must not be empty".into()));
        }

        // Argon2id with a per-user salt
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Hashing(e.to_string()))?
            .to_string();

        if !self.db.create_user(username, &password_hash)? {
            return Err(ApiError::DuplicateUser(username.to_string()));
        }

        info!("Created account '{}'", username);
        Ok(())
    }

    /// True iff the user exists and the password matches its stored hash.
    pub fn verify_user(&self, username: &str, password: &str) -> Result<bool> {
        let Some(user) = self.db.get_user_by_username(username)? else {
            return Ok(false);
        };

        if is_legacy_digest(&user.password_hash) {
            warn!("Account '{}' still carries an unsalted SHA-256 password hash", username);
            return Ok(legacy_digest(password) == user.password_hash.to_ascii_lowercase());
        }

        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Unreadable password hash for '{}': {}", username, e);
                return Ok(false);
            }
        };

        Ok(self.hasher.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

/// Hex SHA-256 rows written by stores that predate Argon2.
fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == 64 && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
pub(crate) fn cheap_hasher() -> Argon2<'static> {
    use argon2::{Algorithm, Params, Version};

    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

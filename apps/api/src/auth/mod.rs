//! Credential Store — username/password registration and login.
//!
//! `AppState` holds an `Arc<dyn CredentialStore>`; the PostgreSQL store is
//! wired at startup and router tests swap in the in-memory one.

pub mod handlers;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stores a new account. `Ok(false)` when the username is taken.
    async fn register(&self, username: &str, password: &str) -> Result<bool, AppError>;

    /// `Ok(false)` for an unknown username or a wrong password.
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Password hashing
// ────────────────────────────────────────────────────────────────────────────

/// Argon2id PHC string with a fresh random salt. CPU-bound; runs on the
/// blocking pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing aborted: {e}")))?
}

/// Checks `password` against a stored PHC string. An unparsable stored hash
/// never verifies.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check aborted: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// PgCredentialStore
// ────────────────────────────────────────────────────────────────────────────

/// Rows live in the `credentials` table (see `db::ensure_schema`).
/// Uniqueness is enforced by the primary key, not by a prior lookup.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn register(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let password_hash = hash_password(password).await?;

        let result = sqlx::query(
            "INSERT INTO credentials (username, password_hash) VALUES ($1, $2) \
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        let registered = result.rows_affected() == 1;
        if registered {
            info!("Registered user '{username}'");
        }
        Ok(registered)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM credentials WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        match stored {
            Some(hash) => verify_password(password, &hash).await,
            None => Ok(false),
        }
    }
}

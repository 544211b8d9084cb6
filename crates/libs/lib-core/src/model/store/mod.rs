//! # Database Store
//!
//! Database connection pool, the store seams the credential gateway depends
//! on, and their SQLite implementations.
//!
//! The gateway only ever sees `Arc<dyn UserStore>` and `Arc<dyn SessionStore>`,
//! so tests can swap in their own implementations.

// region: --- Modules
pub mod models;
pub mod session_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{Session, SessionIdentity, User, UserForCreate};
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use chrono::Duration;
use sqlx::migrate::Migrator;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Embedded schema migrations (`lib-core/migrations`).
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a new SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions

// region: --- Store Traits
/// Persistent User Store.
///
/// Email uniqueness is enforced by the implementation: inserting a second
/// record for an email fails with [`AppError::Conflict`](crate::AppError::Conflict).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user with exactly this email (case-sensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persist a new user.
    async fn insert(&self, user: UserForCreate) -> Result<User>;
}

/// Session Store.
///
/// Sessions are addressed by an opaque token minted by [`create`](SessionStore::create).
/// Expired sessions are never returned.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for `identity` that expires `ttl` from now.
    async fn create(&self, identity: SessionIdentity, ttl: Duration) -> Result<Session>;

    /// Look up a live session.
    async fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Move the expiry of a live session to `ttl` from now.
    ///
    /// Returns `false` if the session no longer exists.
    async fn touch(&self, token: &str, ttl: Duration) -> Result<bool>;

    /// Delete a session. Deleting an unknown token is not an error.
    async fn destroy(&self, token: &str) -> Result<()>;

    /// Delete every expired session, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64>;
}
// endregion: --- Store Traits

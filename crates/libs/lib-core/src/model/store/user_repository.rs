//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! This module implements the repository pattern for user data access,
//! providing a clean abstraction over SQL queries.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserForCreate, UserRepository, UserStore};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite:data/members.db").await?;
//! let users = UserRepository::new(pool);
//!
//! // Create a new user
//! let user = users
//!     .insert(UserForCreate::new(
//!         "Alice".to_string(),
//!         "alice@example.com".to_string(),
//!         "hashed_password".to_string(),
//!     ))
//!     .await?;
//!
//! // Find user by email
//! let found = users.find_by_email("alice@example.com").await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::{DbPool, UserStore};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::query_as;
use tracing::debug;

/// User repository backed by the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Find a user by their email address.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(AppError::Store)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user in the database.
    ///
    /// # Errors
    ///
    /// * `AppError::Conflict` - Email already exists (UNIQUE constraint violation)
    /// * `AppError::Store` - Database connection fails
    async fn insert(&self, user: UserForCreate) -> Result<User> {
        let created = query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?) \
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        debug!("[USERS] Inserted user id={}", created.id);

        Ok(created)
    }
}

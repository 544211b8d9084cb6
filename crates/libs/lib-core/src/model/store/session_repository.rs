//! # Session Repository
//!
//! SQLite-backed session store. Each row maps an opaque token to the
//! identity it authenticates; expiry instants are stored as unix
//! milliseconds.

use super::models::{Session, SessionIdentity};
use super::{DbPool, SessionStore};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use lib_auth::new_session_token;
use lib_utils::now_utc;
use sqlx::{query, query_as, FromRow};
use tracing::debug;

/// Session repository backed by the `sessions` table.
#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: String,
    name: String,
    email: String,
    created_at: i64,
    expires_at: i64,
}

impl TryFrom<SessionRow> for Session {
    type Error = AppError;

    fn try_from(row: SessionRow) -> Result<Self> {
        Ok(Session {
            token: row.id,
            identity: SessionIdentity::new(row.name, row.email),
            created_at: from_millis(row.created_at)?,
            expires_at: from_millis(row.expires_at)?,
        })
    }
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::Store(format!("Invalid session timestamp: {}", millis)))
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create(&self, identity: SessionIdentity, ttl: Duration) -> Result<Session> {
        let now = now_utc();
        let session = Session {
            token: new_session_token(),
            identity,
            created_at: now,
            expires_at: now + ttl,
        };

        query("INSERT INTO sessions (id, name, email, created_at, expires_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&session.token)
            .bind(&session.identity.name)
            .bind(&session.identity.email)
            .bind(session.created_at.timestamp_millis())
            .bind(session.expires_at.timestamp_millis())
            .execute(&self.pool)
            .await?;

        debug!("[SESSIONS] Created session {}...", session.token_prefix());

        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let row = query_as::<_, SessionRow>(
            "SELECT id, name, email, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session = Session::try_from(row)?;
        if session.is_expired_at(now_utc()) {
            debug!("[SESSIONS] Session {}... expired, removing", session.token_prefix());
            self.destroy(token).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn touch(&self, token: &str, ttl: Duration) -> Result<bool> {
        let now = now_utc();

        let result = query("UPDATE sessions SET expires_at = ? WHERE id = ? AND expires_at > ?")
            .bind((now + ttl).timestamp_millis())
            .bind(token)
            .bind(now.timestamp_millis())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn destroy(&self, token: &str) -> Result<()> {
        query("DELETE FROM sessions WHERE id = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now_utc().timestamp_millis())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::MIGRATOR;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        MIGRATOR.run(&pool).await.expect("Failed to run migrations");

        pool
    }

    fn ada() -> SessionIdentity {
        SessionIdentity::new("Ada", "ada@example.com")
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let sessions = SessionRepository::new(setup_test_db().await);

        let created = sessions.create(ada(), Duration::hours(1)).await.unwrap();
        let fetched = sessions.get(&created.token).await.unwrap().expect("session should be live");

        assert_eq!(fetched.identity, ada());
        assert_eq!(fetched.expires_at.timestamp_millis(), created.expires_at.timestamp_millis());
        assert_eq!(created.expires_at - created.created_at, Duration::hours(1));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let sessions = SessionRepository::new(setup_test_db().await);
        assert!(sessions.get("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_not_returned() {
        let pool = setup_test_db().await;
        let sessions = SessionRepository::new(pool.clone());

        let created = sessions.create(ada(), Duration::zero()).await.unwrap();

        assert!(sessions.get(&created.token).await.unwrap().is_none());

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0, "expired session should be removed on read");
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let sessions = SessionRepository::new(setup_test_db().await);
        let created = sessions.create(ada(), Duration::hours(1)).await.unwrap();

        sessions.destroy(&created.token).await.unwrap();
        sessions.destroy(&created.token).await.unwrap();

        assert!(sessions.get(&created.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_extends_live_session_only() {
        let sessions = SessionRepository::new(setup_test_db().await);
        let created = sessions.create(ada(), Duration::minutes(1)).await.unwrap();

        assert!(sessions.touch(&created.token, Duration::hours(2)).await.unwrap());
        let touched = sessions.get(&created.token).await.unwrap().unwrap();
        assert!(touched.expires_at > created.expires_at + Duration::minutes(30));

        let expired = sessions.create(ada(), Duration::zero()).await.unwrap();
        assert!(!sessions.touch(&expired.token, Duration::hours(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let sessions = SessionRepository::new(setup_test_db().await);
        let live = sessions.create(ada(), Duration::hours(1)).await.unwrap();
        sessions.create(ada(), Duration::zero()).await.unwrap();
        sessions.create(ada(), Duration::zero()).await.unwrap();

        assert_eq!(sessions.purge_expired().await.unwrap(), 2);
        assert!(sessions.get(&live.token).await.unwrap().is_some());
    }
}

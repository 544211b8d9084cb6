//! # Credential Gateway
//!
//! Signup, login, logout and session checks.
//!
//! ## Overview
//!
//! The gateway validates form input, enforces one account per email, hashes
//! and verifies passwords, and issues or destroys sessions. It owns no
//! storage itself: both stores are injected, so the same flow runs against
//! SQLite in production and against hand-written stores in tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_core::dto::{LoginRequest, SignupRequest};
//! use lib_core::{create_pool, Config};
//! use lib_web::services::CredentialGateway;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let config = Config::default();
//! let pool = create_pool(&config.database_url).await?;
//! let gateway = CredentialGateway::from_pool(pool, &config);
//!
//! let session = gateway
//!     .signup(SignupRequest::new("Ada", "ada@example.com", "hunter2"))
//!     .await?;
//! let identity = gateway.require_session(Some(&session.token)).await?;
//! assert_eq!(identity.email, "ada@example.com");
//!
//! gateway.logout(Some(&session.token)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - `AppError::Validation` - first violated input rule
//! - `AppError::Conflict` - email already registered
//! - `AppError::Auth` - unknown email or wrong password (indistinguishable)
//! - `AppError::Unauthenticated` - no live session for the token
//! - `AppError::Store` - store failure, never retried

use chrono::Duration;
use lib_auth::{hash_password, is_well_formed_token, verify_password, verify_password_against_decoy};
use lib_core::dto::{LoginRequest, SignupRequest};
use lib_core::model::store::{
    Session, SessionIdentity, SessionRepository, SessionStore, UserForCreate, UserRepository,
    UserStore,
};
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::{format_time, validate_email, validate_not_empty, validate_required};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Credential verification and session issuance.
#[derive(Clone)]
pub struct CredentialGateway {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
    rolling: bool,
}

impl CredentialGateway {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        session_ttl: Duration,
        rolling: bool,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
            rolling,
        }
    }

    /// Gateway over the SQLite repositories sharing one pool.
    pub fn from_pool(pool: DbPool, config: &Config) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(SessionRepository::new(pool)),
            config.session_ttl(),
            config.session_rolling,
        )
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    /// Create an account and log it in.
    #[instrument(skip_all, fields(email = req.email.as_deref().unwrap_or_default()))]
    pub async fn signup(&self, req: SignupRequest) -> Result<Session> {
        info!("[SIGNUP] New user signup request");

        let (name, email, password) = validate_signup(req)?;

        if self.users.find_by_email(&email).await?.is_some() {
            warn!("[SIGNUP] Email already registered");
            return Err(AppError::Conflict(lib_core::error::EMAIL_TAKEN.to_string()));
        }

        debug!("[SIGNUP] Hashing password...");
        let password_hash = run_blocking(move || hash_password(&password)).await??;

        // The unique index still rejects a concurrent signup that passed the check above.
        let user = self
            .users
            .insert(UserForCreate::new(name, email, password_hash))
            .await?;

        let session = self
            .sessions
            .create(SessionIdentity::from(&user), self.session_ttl)
            .await?;

        info!(
            "[SIGNUP] User {} created, session {}... expires {}",
            user.id,
            session.token_prefix(),
            format_time(session.expires_at)
        );

        Ok(session)
    }

    /// Verify credentials and open a session.
    #[instrument(skip_all, fields(email = req.email.as_deref().unwrap_or_default()))]
    pub async fn login(&self, req: LoginRequest) -> Result<Session> {
        info!("[LOGIN] Login attempt");

        let (email, password) = validate_login(req)?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            run_blocking(move || verify_password_against_decoy(&password)).await?;
            warn!("[LOGIN] Unknown email");
            return Err(AppError::Auth);
        };

        let stored_hash = user.password_hash.clone();
        let is_valid = run_blocking(move || verify_password(&password, &stored_hash)).await??;

        if !is_valid {
            warn!("[LOGIN] Invalid password for user {}", user.id);
            return Err(AppError::Auth);
        }

        let session = self
            .sessions
            .create(SessionIdentity::from(&user), self.session_ttl)
            .await?;

        info!(
            "[LOGIN] User {} authenticated, session {}... expires {}",
            user.id,
            session.token_prefix(),
            format_time(session.expires_at)
        );

        Ok(session)
    }

    /// Destroy the session behind `token`, if any.
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        if let Some(token) = token {
            self.sessions.destroy(token).await?;
            debug!("[LOGOUT] Session destroyed");
        }
        Ok(())
    }

    /// Identity of the live session behind `token`.
    ///
    /// Slides the session expiry forward when rolling sessions are enabled.
    pub async fn require_session(&self, token: Option<&str>) -> Result<SessionIdentity> {
        let token = token
            .filter(|token| is_well_formed_token(token))
            .ok_or(AppError::Unauthenticated)?;

        let session = self
            .sessions
            .get(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if self.rolling && !self.sessions.touch(token, self.session_ttl).await? {
            // Expired between the read and the touch.
            return Err(AppError::Unauthenticated);
        }

        Ok(session.identity)
    }

    /// Like [`require_session`](Self::require_session), but a missing session is `None`.
    pub async fn current_identity(&self, token: Option<&str>) -> Result<Option<SessionIdentity>> {
        match self.require_session(token).await {
            Ok(identity) => Ok(Some(identity)),
            Err(AppError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn purge_expired_sessions(&self) -> Result<u64> {
        self.sessions.purge_expired().await
    }
}

/// Rules are checked in field order; the first failure wins.
fn validate_signup(req: SignupRequest) -> Result<(String, String, String)> {
    let name = validated(req.name, "name", validate_not_empty)?;
    let email = validated(req.email, "email", validate_email)?;
    let password = validated(req.password, "password", validate_not_empty)?;
    Ok((name, email, password))
}

fn validate_login(req: LoginRequest) -> Result<(String, String)> {
    let email = validated(req.email, "email", validate_email)?;
    let password = validated(req.password, "password", validate_not_empty)?;
    Ok((email, password))
}

/// Presence first, then `rule`.
fn validated(
    value: Option<String>,
    field_name: &str,
    rule: fn(&str, &str) -> std::result::Result<(), String>,
) -> Result<String> {
    validate_required(value.as_deref(), field_name)
        .and_then(|v| rule(v, field_name))
        .map_err(AppError::Validation)?;
    Ok(value.unwrap_or_default())
}

/// Run CPU-bound password work off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))
}

//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The config is built once by the server and handed to whoever needs it
//! through the application state; there is no global instance.
//!
//! ## Environment
//!
//! | Variable                | Default                  |
//! |-------------------------|--------------------------|
//! | `DATABASE_URL`          | `sqlite:data/members.db` |
//! | `PORT`                  | `3000`                   |
//! | `SESSION_TTL_SECS`      | `3600`                   |
//! | `SESSION_ROLLING`       | `true`                   |
//! | `SESSION_COOKIE_SECURE` | `false`                  |
//! | `SESSION_PURGE_SECS`    | `300`                    |

use crate::error::{AppError, Result};
use chrono::Duration;
use lib_utils::{get_env_or, get_env_parse_or};

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// TCP port the HTTP server listens on
    pub port: u16,

    /// Session lifetime in seconds
    ///
    /// Valid range: 60 seconds to 30 days.
    pub session_ttl_secs: i64,

    /// Push the session expiry forward on every authenticated request
    pub session_rolling: bool,

    /// Mark the session cookie `Secure` (HTTPS only)
    pub session_cookie_secure: bool,

    /// Interval between expired-session sweeps, in seconds
    pub session_purge_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/members.db".to_string(),
            port: 3000,
            session_ttl_secs: 60 * 60,
            session_rolling: true,
            session_cookie_secure: false,
            session_purge_secs: 300,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            database_url: get_env_or("DATABASE_URL", &defaults.database_url),
            port: get_env_parse_or("PORT", defaults.port)?,
            session_ttl_secs: get_env_parse_or("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            session_rolling: get_env_parse_or("SESSION_ROLLING", defaults.session_rolling)?,
            session_cookie_secure: get_env_parse_or(
                "SESSION_COOKIE_SECURE",
                defaults.session_cookie_secure,
            )?,
            session_purge_secs: get_env_parse_or("SESSION_PURGE_SECS", defaults.session_purge_secs)?,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(AppError::Config(
                "DATABASE_URL must be a sqlite: URL".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(AppError::Config("PORT must be non-zero".to_string()));
        }

        if !(60..=30 * 24 * 60 * 60).contains(&self.session_ttl_secs) {
            return Err(AppError::Config(
                "SESSION_TTL_SECS must be between 60 and 2592000 (30 days)".to_string(),
            ));
        }

        if self.session_purge_secs < 10 {
            return Err(AppError::Config(
                "SESSION_PURGE_SECS must be at least 10".to_string(),
            ));
        }

        Ok(())
    }

    /// Session lifetime as a chrono duration.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl_secs)
    }
}

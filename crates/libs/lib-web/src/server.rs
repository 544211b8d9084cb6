//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that loads the
//! configuration, opens and migrates the database, creates the Axum router,
//! applies middleware, and starts the HTTP server.

// region: --- Imports
use crate::handlers::{auth, pages};
use crate::middleware::{log_requests, require_session, stamp_req, RequestStamp};
use crate::services::CredentialGateway;
use axum::{middleware, routing::{get, post}, Router};
use lib_core::{create_pool, Config, DbPool, MIGRATOR};
use std::path::Path;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub gateway: CredentialGateway,
}

impl AppState {
    /// State whose gateway runs on the SQLite stores in `db`.
    pub fn new(db: DbPool, config: Config) -> Self {
        let gateway = CredentialGateway::from_pool(db.clone(), &config);
        Self { db, config, gateway }
    }
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for CredentialGateway {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Interface to bind; the port comes from [`Config::port`]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(server: ServerConfig) -> anyhow::Result<()> {
    init_tracing()?;

    info!("MEMBERS SERVER STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    info!("Database URL: {}", app_config.database_url);
    ensure_database_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    let state = AppState::new(pool, app_config);

    spawn_session_purge(
        state.gateway.clone(),
        Duration::from_secs(state.config.session_purge_secs),
    );

    let bind_address = format!("{}:{}", server.host, state.config.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Install the global tracing subscriber, level from `LOG_LEVEL` (default `info`).
fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!("Log level: {}", log_level);
    Ok(())
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(db_path) = sqlite_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    info!("Database file will be at: {}", db_path);

    Ok(())
}

/// File path of a `sqlite:` URL, or `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

/// Periodically delete expired sessions. Failures are logged and retried on
/// the next tick.
fn spawn_session_purge(gateway: CredentialGateway, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match gateway.purge_expired_sessions().await {
                Ok(0) => {}
                Ok(purged) => info!("[SESSIONS] Purged {} expired session(s)", purged),
                Err(e) => warn!("[SESSIONS] Expired session purge failed: {}", e),
            }
        }
    });
    info!("Background session purge started ({}s interval)", every.as_secs());
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    info!("[ROUTE SETUP] Registering HTTP routes...");

    let members = Router::new()
        .route("/members", get(pages::members))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(pages::home))
        .route("/signup", get(pages::signup_page))
        .route("/signupSubmit", post(auth::signup_submit))
        .route("/login", get(pages::login_page))
        .route("/loginSubmit", post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route("/health", get(pages::health))
        .merge(members)
        .fallback(pages::not_found)
        .with_state(state)
        // Innermost first: logging sees the stamp, the stamp wraps everything.
        .layer(middleware::from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %RequestStamp::id_of(request),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |failure: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &tracing::Span| {
                        error!(
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] {}",
                            failure
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(stamp_req))
        .layer(CookieManagerLayer::new())
}

/// Log server information
fn log_server_info() {
    info!(" PAGES:");
    info!("   • GET  /");
    info!("   • GET  /signup");
    info!("   • GET  /login");
    info!("   • GET  /members (session required)");
    info!(" AUTH:");
    info!("   • POST /signupSubmit");
    info!("   • POST /loginSubmit");
    info!("   • GET  /logout");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

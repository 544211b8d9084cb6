//! # Page Handlers

use crate::middleware::session_token;
use crate::services::CredentialGateway;
use crate::views;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use lib_core::model::store::SessionIdentity;
use lib_core::{AppError, DbPool};
use serde_json::json;
use tower_cookies::Cookies;
use tracing::error;

/// `GET /`
pub async fn home(
    State(gateway): State<CredentialGateway>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let token = session_token(&cookies);

    Ok(match gateway.current_identity(token.as_deref()).await? {
        Some(identity) => views::home_member(&identity.name),
        None => views::home_guest(),
    })
}

/// `GET /signup`
pub async fn signup_page() -> Html<String> {
    views::signup_form()
}

/// `GET /login`
pub async fn login_page() -> Html<String> {
    views::login_form()
}

/// `GET /members`, behind [`require_session`](crate::middleware::require_session).
pub async fn members(Extension(identity): Extension<SessionIdentity>) -> Html<String> {
    views::members(&identity.name)
}

/// `GET /health`
pub async fn health(State(db): State<DbPool>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&db).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            error!("[HEALTH] Database unreachable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, views::not_found())
}

//! # Session Middleware
//!
//! Session cookie handling and the gate in front of session-only pages.
//!
//! The cookie carries only the opaque session token; the identity lives in
//! the session store. Gated handlers read it from request extensions:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use lib_core::model::store::SessionIdentity;
//!
//! async fn members(Extension(identity): Extension<SessionIdentity>) -> String {
//!     format!("Hello, {}.", identity.name)
//! }
//! ```

use crate::server::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Duration;
use lib_core::AppError;
use tower_cookies::cookie::{time, SameSite};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Session token presented by the client, if any.
pub fn session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Issue (or re-issue) the session cookie with a lifetime of `ttl`.
pub fn set_session_cookie(cookies: &Cookies, token: &str, ttl: Duration, secure: bool) {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build();

    cookies.add(cookie);
}

/// Tell the client to drop its session cookie.
pub fn clear_session_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build(SESSION_COOKIE).path("/").build());
}

/// Gate for session-only routes.
///
/// # Behavior
///
/// - **Live session**: injects the `SessionIdentity` into request extensions,
///   re-issues the cookie when sessions are rolling, and continues
/// - **No session**: redirects to `/` (dropping a stale cookie)
/// - **Store failure**: generic 500 page
pub async fn require_session(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let token = session_token(&cookies);

    match state.gateway.require_session(token.as_deref()).await {
        Ok(identity) => {
            if let (true, Some(token)) = (state.gateway.is_rolling(), token.as_deref()) {
                set_session_cookie(
                    &cookies,
                    token,
                    state.gateway.session_ttl(),
                    state.config.session_cookie_secure,
                );
            }

            debug!("[SESSION] Authenticated {}", identity.email);
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(AppError::Unauthenticated) => {
            debug!("[SESSION] No live session for {}, redirecting home", req.uri().path());
            if token.is_some() {
                clear_session_cookie(&cookies);
            }
            Redirect::to("/").into_response()
        }
        Err(e) => e.into_response(),
    }
}

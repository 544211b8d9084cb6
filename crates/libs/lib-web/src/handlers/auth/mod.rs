//! # Authentication Handlers
//!
//! HTTP request handlers for the signup and login forms and for logout.
//!
//! ## Overview
//!
//! - Successful signup/login sets the `sid` session cookie and redirects to
//!   `/members`
//! - Rejected input (including bodies the form extractor cannot parse),
//!   duplicate email and bad credentials re-render a short message with a
//!   "Try again" link back to the form
//! - A session the client already held is destroyed when a new one is issued
//! - Store failures render the generic error page
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{Router, routing::{get, post}};
//! use lib_web::handlers::auth::{login_submit, logout, signup_submit};
//! use lib_web::AppState;
//!
//! let app: Router<AppState> = Router::new()
//!     .route("/signupSubmit", post(signup_submit))
//!     .route("/loginSubmit", post(login_submit))
//!     .route("/logout", get(logout));
//! ```

use crate::middleware::{clear_session_cookie, session_token, set_session_cookie};
use crate::services::CredentialGateway;
use crate::views;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::{IntoResponse, Redirect, Response},
};
use lib_core::dto::{LoginRequest, SignupRequest};
use lib_core::model::store::Session;
use lib_core::{AppError, Config};
use tower_cookies::Cookies;
use tracing::{info, instrument};

/// Signup handler - creates a new user account and logs it in.
///
/// # Returns
///
/// * `Ok(Redirect)` - `303` to `/members` with the session cookie set
/// * `Err(Response)` - `400` validation message (also for unparseable bodies), `409` duplicate email, or `500`
#[instrument(skip_all)]
pub async fn signup_submit(
    State(gateway): State<CredentialGateway>,
    State(config): State<Config>,
    cookies: Cookies,
    form: Result<Form<SignupRequest>, FormRejection>,
) -> Result<Redirect, Response> {
    let Form(req) = form.map_err(|rejection| form_failure(rejected_form(&rejection), "/signup"))?;

    let session = gateway
        .signup(req)
        .await
        .map_err(|e| form_failure(e, "/signup"))?;

    start_session(&cookies, &session, &gateway, &config)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Redirect::to("/members"))
}

/// Login handler - authenticates an existing user.
///
/// # Returns
///
/// * `Ok(Redirect)` - `303` to `/members` with the session cookie set
/// * `Err(Response)` - `400` validation message, `401` generic credential failure, or `500`
#[instrument(skip_all)]
pub async fn login_submit(
    State(gateway): State<CredentialGateway>,
    State(config): State<Config>,
    cookies: Cookies,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Redirect, Response> {
    let Form(req) = form.map_err(|rejection| form_failure(rejected_form(&rejection), "/login"))?;

    let session = gateway
        .login(req)
        .await
        .map_err(|e| form_failure(e, "/login"))?;

    start_session(&cookies, &session, &gateway, &config)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Redirect::to("/members"))
}

/// Logout handler - destroys the session and drops the cookie.
pub async fn logout(
    State(gateway): State<CredentialGateway>,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    let token = session_token(&cookies);

    gateway.logout(token.as_deref()).await?;

    if token.is_some() {
        clear_session_cookie(&cookies);
        info!("[LOGOUT] Session ended");
    }

    Ok(Redirect::to("/"))
}

/// Replace whatever session the client held with `session`.
async fn start_session(
    cookies: &Cookies,
    session: &Session,
    gateway: &CredentialGateway,
    config: &Config,
) -> Result<(), AppError> {
    gateway.logout(session_token(cookies).as_deref()).await?;

    set_session_cookie(
        cookies,
        &session.token,
        gateway.session_ttl(),
        config.session_cookie_secure,
    );
    Ok(())
}

/// Validation error for a body the form extractor refused.
///
/// A repeated key is reported like any other ill-typed field:
/// `"name" must be a string`.
fn rejected_form(rejection: &FormRejection) -> AppError {
    let detail = rejection.body_text();

    let duplicate = detail
        .split_once("duplicate field `")
        .and_then(|(_, rest)| rest.split_once('`'))
        .map(|(field, _)| field.to_string());

    let message = match duplicate {
        Some(field) => format!("\"{}\" must be a string", field),
        None => detail,
    };

    AppError::Validation(message)
}

/// User-facing failures get the message and a retry link; server faults get
/// the generic error page.
fn form_failure(err: AppError, retry_href: &str) -> Response {
    if err.is_client_error() {
        (err.status_code(), views::form_error(&err.user_message(), retry_href)).into_response()
    } else {
        err.into_response()
    }
}

#[cfg(test)]
mod tests;

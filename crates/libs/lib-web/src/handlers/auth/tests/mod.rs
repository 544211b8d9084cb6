//! # Auth Handler Tests
//!
//! Drive the full router (cookies, session gate, fallback) with in-memory
//! SQLite behind it.

mod signup;

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use lib_core::{Config, DbPool, MIGRATOR};
use sqlx::sqlite::SqlitePoolOptions;

/// Setup migrated test database
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        ..Default::default()
    }
}

/// Create test app with the production router
pub async fn test_app() -> Router {
    create_router(AppState::new(setup_test_db().await, test_config()))
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    form_post_with_cookie(uri, body, None)
}

pub fn form_post_with_cookie(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Full `Set-Cookie` header for the session cookie, if one was sent.
pub fn session_set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .map(str::to_string)
}

/// `sid=<token>` pair to send back in a `Cookie` header.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    session_set_cookie(response)
        .and_then(|v| v.split(';').next().map(str::to_string))
        .filter(|pair| pair.len() > "sid=".len())
}

pub fn location<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Sign up `A <a@x.com>` with password `p`, returning the session cookie.
pub async fn signup_ada(app: &Router) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(form_post("/signupSubmit", "name=A&email=a%40x.com&password=p"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("signup should set the session cookie")
}

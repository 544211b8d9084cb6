//! # Request/Response Logging Middleware
//!
//! Structured logging for every HTTP request and response:
//! - method, path and request ID on the way in
//! - headers at debug level, with credentials redacted
//! - status and latency on the way out, at a level matching the status class
//!
//! Form bodies are never logged; the credential endpoints are additionally
//! tagged `sensitive` so log readers know not to expect payload details.

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Headers whose values are replaced before logging.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "proxy-authorization"];

/// Endpoints that receive credentials.
const SENSITIVE_ENDPOINTS: &[&str] = &["/signupSubmit", "/loginSubmit"];

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let (request_id, started) = req
        .extensions()
        .get::<RequestStamp>()
        .map(|stamp| (stamp.id.clone(), stamp.started))
        .unwrap_or_else(|| ("unknown".to_string(), Instant::now()));

    let sensitive = SENSITIVE_ENDPOINTS.contains(&path.as_str());

    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        sensitive,
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(request_id = %request_id, headers = ?headers, "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    }

    response
}

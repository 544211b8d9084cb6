//! # Middleware
//!
//! Axum middleware for session gating, request stamping, and request logging.
//!
//! ## Modules
//!
//! - **[`mw_session`]**: session cookie helpers and the members-area gate
//! - **[`mw_req_stamp`]**: request ID and start time stamping
//! - **[`mw_logging`]**: request/response logging with header redaction

// region: --- Modules
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_session;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_session::{
    clear_session_cookie, require_session, session_token, set_session_cookie, SESSION_COOKIE,
};
// endregion: --- Re-exports

//! # Utilities Library
//!
//! Shared utility functions for base64 encoding, environment variables, time,
//! HTML escaping, and form validation.

pub mod b64;
pub mod envs;
pub mod html;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_encode};
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use html::escape_html;
pub use time::{format_time, now_utc};
pub use validation::{validate_email, validate_not_empty, validate_required};

//! # Authentication Library
//!
//! Password hashing and opaque session token management.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password, verify_password_against_decoy};
pub use token::{is_well_formed_token, new_session_token};

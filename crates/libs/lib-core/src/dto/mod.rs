//! # Data Transfer Objects (DTOs)
//!
//! Form payloads accepted by the HTTP layer and handed to the credential
//! gateway.

pub mod auth;

pub use auth::*;

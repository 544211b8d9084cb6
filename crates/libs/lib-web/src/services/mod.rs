//! # Services Layer
//!
//! Business logic sitting between the HTTP handlers and the stores:
//!
//! ```text
//! Handlers (HTTP) → CredentialGateway → UserStore / SessionStore
//! ```
//!
//! Services return `Result<T, AppError>`; handlers decide how each error
//! variant is presented.

pub mod credentials;

pub use credentials::CredentialGateway;

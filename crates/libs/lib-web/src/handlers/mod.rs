//! # HTTP Request Handlers
//!
//! - **[`auth`]**: form submissions and logout
//!   - `POST /signupSubmit` - create an account and log in
//!   - `POST /loginSubmit` - log in
//!   - `GET /logout` - end the session
//!
//! - **[`pages`]**: page views
//!   - `GET /` - landing page, greets logged-in users
//!   - `GET /signup`, `GET /login` - forms
//!   - `GET /members` - session-gated members area
//!   - `GET /health` - liveness and database check
//!   - fallback - 404 page
//!
//! Handlers delegate to [`crate::services::CredentialGateway`] and only decide
//! how results are presented.

pub mod auth;
pub mod pages;

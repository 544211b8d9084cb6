//! # Web Library
//!
//! HTTP handlers, views, middleware, the credential gateway service, and
//! server setup.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod views;

pub use server::{create_router, start_server, AppState, ServerConfig};

//! # Core Library
//!
//! Core models, stores, configuration, and error handling for the members
//! service.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, MIGRATOR};

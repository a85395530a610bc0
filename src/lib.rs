//! Student Registry Library
//!
//! Registration, login and profile lookup for student records, served over
//! HTTP with bcrypt password hashing and JWT sessions.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;

// Re-export commonly used types
pub use crate::core::{Config, RegistryError};
pub use api::ApiServer;
pub use db::DatabaseManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the binary
pub type Result<T> = anyhow::Result<T>;

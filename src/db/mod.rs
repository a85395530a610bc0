//! Database module
//!
//! This module provides persistence for student records:
//! - SQLite connection pool management
//! - The `StudentStore` trait and its SQLite repository
//! - Table bootstrap and row models

pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;

pub use manager::DatabaseManager;
pub use models::Student;
pub use repository::{StudentRepository, StudentStore};

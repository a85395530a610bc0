//! Authentication module
//!
//! This module provides:
//! - Password hashing and verification (bcrypt)
//! - Token generation and validation (JWT)
//! - The bearer-token middleware guarding protected routes

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{generate_token, validate_token, Claims};
pub use middleware::{authenticate, AuthStudent};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};

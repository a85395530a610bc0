//! Core application layer
//!
//! Configuration, structured logging and the error type shared by every
//! other module.

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{ErrorResponse, RegistryError, Result};
pub use logging::Logger;

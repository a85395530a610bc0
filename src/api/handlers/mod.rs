pub mod students;

pub use students::*;

use crate::core::config::SecurityConfig;
use crate::db::repository::StudentStore;
use std::sync::Arc;

/// Shared application state for handlers
///
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub student_repo: Arc<dyn StudentStore>,
    pub jwt_secret: Arc<String>,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(student_repo: Arc<dyn StudentStore>, security: &SecurityConfig) -> Self {
        Self {
            student_repo,
            jwt_secret: Arc::new(security.jwt_secret.clone()),
            token_ttl: security.token_lifetime(),
            bcrypt_cost: security.bcrypt_cost,
        }
    }
}

//! REST API module
//!
//! This module provides the HTTP server and REST API endpoints including:
//! - Registration, login and profile handlers
//! - Request tracing middleware
//! - JSON extraction with uniform error bodies

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use middleware::{trace_id_middleware, TraceId, TRACE_ID_HEADER};
pub use server::{build_router, ApiServer};

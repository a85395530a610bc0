//! API routes

use crate::api::handlers::{login, profile, register, AppState};
use crate::auth::middleware::authenticate;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/profile", get(profile))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes.merge(protected_routes).with_state(state)
}

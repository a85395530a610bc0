//! Authentication middleware

use crate::api::handlers::AppState;
use crate::auth::jwt::validate_token;
use crate::core::error::{RegistryError, Result};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Identity carried by a validated token
#[derive(Clone, Debug)]
pub struct AuthStudent {
    pub id: String,
    pub roll_no: String,
}

/// Require a valid `Authorization: Bearer <token>` header
///
/// No header yields "Token missing"; any other problem yields
/// "Invalid token". The record itself is not looked up here.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    let claims = match validate_token(&token, &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    tracing::debug!(student_id = %claims.id, roll_no = %claims.roll_no, "Token accepted");

    request.extensions_mut().insert(AuthStudent {
        id: claims.id,
        roll_no: claims.roll_no,
    });

    next.run(request).await
}

fn bearer_token(request: &Request) -> Result<String> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| RegistryError::AuthenticationError("Token missing".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RegistryError::AuthenticationError("Invalid token".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthStudent
where
    S: Send + Sync,
{
    type Rejection = RegistryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthStudent>()
            .cloned()
            .ok_or_else(|| RegistryError::AuthenticationError("Token missing".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_token;
    use crate::db::{DatabaseManager, StudentRepository};
    use axum::{
        body::Body,
        http::StatusCode,
        middleware,
        routing::get,
        Router,
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    const SECRET: &str = "middleware-secret";

    async fn whoami(student: AuthStudent) -> String {
        format!("{}:{}", student.id, student.roll_no)
    }

    fn app() -> Router {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let state = AppState {
            student_repo: Arc::new(StudentRepository::new(db)),
            jwt_secret: Arc::new(SECRET.to_string()),
            token_ttl: chrono::Duration::hours(1),
            bcrypt_cost: crate::core::config::MIN_BCRYPT_COST,
        };

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    async fn call(authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = generate_token("id-1", "R1", SECRET, chrono::Duration::hours(1)).unwrap();
        let (status, body) = call(Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "id-1:R1");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Token missing"));
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        let token = generate_token("id-1", "R1", SECRET, chrono::Duration::hours(1)).unwrap();
        let (status, body) = call(Some(&format!("Basic {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_empty_bearer() {
        let (status, body) = call(Some("Bearer ")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_foreign_secret() {
        let token = generate_token("id-1", "R1", "someone-else", chrono::Duration::hours(1)).unwrap();
        let (status, body) = call(Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }
}

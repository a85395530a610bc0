//! Registration, login and profile handlers

use crate::api::extract::JsonBody;
use crate::api::handlers::AppState;
use crate::api::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, StudentProfile};
use crate::auth::jwt::generate_token;
use crate::auth::middleware::AuthStudent;
use crate::auth::password::{hash_password_async, verify_password_async};
use crate::core::error::{RegistryError, Result};
use crate::db::models::Student;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

/// Handler for POST /register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(roll_no = %req.roll_no, "Student registration attempt");

    req.validate()?;

    // Fast path only; the UNIQUE constraint on insert is what actually decides
    if state.student_repo.find_by_roll(&req.roll_no).await?.is_some() {
        return Err(RegistryError::DuplicateRollNo(req.roll_no));
    }

    let password_hash = hash_password_async(req.password, state.bcrypt_cost).await?;

    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        roll_no: req.roll_no,
        password_hash,
        subject1: req.subject1,
        subject2: req.subject2,
        subject3: req.subject3,
        subject4: req.subject4,
        subject5: req.subject5,
    };

    let student_id = state.student_repo.insert(&student).await?;

    tracing::info!(
        student_id = %student_id,
        roll_no = %student.roll_no,
        "Student registered successfully"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Student registered successfully")),
    ))
}

/// Handler for POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    tracing::info!(roll_no = %req.roll_no, "Login attempt");

    let student = state
        .student_repo
        .find_by_roll(&req.roll_no)
        .await?
        .ok_or_else(|| RegistryError::NotFound("Student not found".to_string()))?;

    let is_valid = verify_password_async(req.password, student.password_hash.clone()).await?;
    if !is_valid {
        return Err(RegistryError::AuthenticationError("Invalid password".to_string()));
    }

    let token = generate_token(&student.id, &student.roll_no, &state.jwt_secret, state.token_ttl)?;

    tracing::info!(student_id = %student.id, roll_no = %student.roll_no, "Login successful");

    Ok(Json(LoginResponse { token }))
}

/// Handler for GET /profile
pub async fn profile(
    State(state): State<AppState>,
    student: AuthStudent,
) -> Result<Json<StudentProfile>> {
    tracing::info!(student_id = %student.id, "Fetching student profile");

    // the token can outlive its record
    let record = state
        .student_repo
        .find_by_id(&student.id)
        .await?
        .ok_or_else(|| RegistryError::NotFound("Student not found".to_string()))?;

    Ok(Json(StudentProfile::from(record)))
}

//! Student store
//!
//! [`StudentStore`] is the persistence seam used by the HTTP layer;
//! [`StudentRepository`] implements it on SQLite.

use crate::core::error::{RegistryError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::models::Student;
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::sync::Arc;

/// Persistence operations for student records
///
/// Records are never updated or deleted.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Find a student by roll number
    async fn find_by_roll(&self, roll_no: &str) -> Result<Option<Student>>;

    /// Find a student by record ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Student>>;

    /// Insert a new student and return its ID
    ///
    /// Fails with [`RegistryError::DuplicateRollNo`] when the roll number is
    /// taken, even if a prior lookup found nothing.
    async fn insert(&self, student: &Student) -> Result<String>;
}

/// SQLite-backed student store
pub struct StudentRepository {
    db: Arc<DatabaseManager>,
}

impl StudentRepository {
    /// Create a new StudentRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: &'static str, value: &str) -> Result<Option<Student>> {
        let value = value.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM students WHERE {} = ?", Student::COLUMNS, column),
                    [&value],
                    Student::from_row,
                )
                .optional()
                .map_err(RegistryError::DatabaseError)
            })
            .await
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn find_by_roll(&self, roll_no: &str) -> Result<Option<Student>> {
        self.find_one("roll_no", roll_no).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Student>> {
        self.find_one("id", id).await
    }

    async fn insert(&self, student: &Student) -> Result<String> {
        let student = student.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    &format!(
                        "INSERT INTO students ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                        Student::COLUMNS
                    ),
                    rusqlite::params![
                        &student.id,
                        &student.name,
                        &student.roll_no,
                        &student.password_hash,
                        student.subject1,
                        student.subject2,
                        student.subject3,
                        student.subject4,
                        student.subject5,
                    ],
                )
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        RegistryError::DuplicateRollNo(student.roll_no.clone())
                    } else {
                        RegistryError::DatabaseError(e)
                    }
                })?;
                Ok(student.id)
            })
            .await
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

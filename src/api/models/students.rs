//! Student request/response models

use crate::core::error::{RegistryError, Result};
use crate::db::models::Student;
use serde::{Deserialize, Serialize};

/// Register request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub roll_no: String,
    pub password: String,
    pub subject1: i64,
    pub subject2: i64,
    pub subject3: i64,
    pub subject4: i64,
    pub subject5: i64,
}

impl RegisterRequest {
    /// Reject empty identity fields; scores are taken as-is
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::ValidationError("name is required".to_string()));
        }
        if self.roll_no.trim().is_empty() {
            return Err(RegistryError::ValidationError("roll_no is required".to_string()));
        }
        Ok(())
    }
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub roll_no: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Student record as returned to clients, without the password hash
#[derive(Debug, Serialize)]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub subject1: i64,
    pub subject2: i64,
    pub subject3: i64,
    pub subject4: i64,
    pub subject5: i64,
}

impl From<Student> for StudentProfile {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            roll_no: student.roll_no,
            subject1: student.subject1,
            subject2: student.subject2,
            subject3: student.subject3,
            subject4: student.subject4,
            subject5: student.subject5,
        }
    }
}

/// Plain `{message}` body for successful writes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, roll_no: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            password: "p".to_string(),
            subject1: -1,
            subject2: 0,
            subject3: 0,
            subject4: 0,
            subject5: 1000,
        }
    }

    #[test]
    fn test_validate() {
        assert!(request("A", "R1").validate().is_ok());
        assert!(request("", "R1").validate().is_err());
        assert!(request("A", "   ").validate().is_err());
    }

    #[test]
    fn test_profile_has_no_hash() {
        let profile = StudentProfile::from(Student {
            id: "id-1".into(),
            name: "A".into(),
            roll_no: "R1".into(),
            password_hash: "$2b$10$hash".into(),
            subject1: 10,
            subject2: 20,
            subject3: 30,
            subject4: 40,
            subject5: 50,
        });

        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object["subject3"], 30);
    }
}

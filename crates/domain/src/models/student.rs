//! Student domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::MAX_NAME_LENGTH;
use uuid::Uuid;
use validator::Validate;

/// Represents a student record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub program: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable attributes of a student, as written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub program: String,
}

/// Request payload for creating or replacing a student.
///
/// All three fields are required; an `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "First name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Last name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub last_name: String,

    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Program must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub program: String,
}

impl From<StudentRequest> for StudentFields {
    fn from(request: StudentRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            program: request.program,
        }
    }
}

/// Public JSON representation of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub program: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            program: s.program,
        }
    }
}

//! Student resource handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, StudentId};
use crate::middleware::metrics::{record_student_created, record_student_deleted};
use domain::models::{StudentRequest, StudentResponse};

/// Collection path of the student resource.
pub const STUDENTS_PATH: &str = "/api/students";

/// Location of a single student.
pub fn student_location(id: &uuid::Uuid) -> String {
    format!("{}/{}", STUDENTS_PATH, id)
}

/// List all students.
///
/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = state.store.list().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Get a single student by ID.
///
/// GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state.store.get(id).await?;
    Ok(Json(student.into()))
}

/// Create a new student.
///
/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StudentRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<StudentResponse>), ApiError> {
    request.validate()?;

    let student = state.store.create(request.into()).await?;
    record_student_created();
    info!(student_id = %student.id, "Student created");

    let location = student_location(&student.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(student.into()),
    ))
}

/// Replace the fields of an existing student.
///
/// PUT /api/students/:id
pub async fn update_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
    ApiJson(request): ApiJson<StudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    request.validate()?;

    let student = state.store.update(id, request.into()).await?;
    info!(student_id = %id, "Student updated");

    Ok(Json(student.into()))
}

/// Delete a student.
///
/// DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    record_student_deleted();
    info!(student_id = %id, "Student deleted");

    Ok(StatusCode::ACCEPTED)
}

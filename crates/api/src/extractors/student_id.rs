//! Student identifier path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use shared::validation::parse_resource_id;
use uuid::Uuid;

use crate::error::ApiError;

/// The `{id}` path segment of a student route, parsed as a UUID.
///
/// Anything that is not a UUID is rejected with `400 Bad Request` before a
/// handler touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_resource_id(&raw)
            .map(StudentId)
            .ok_or_else(|| ApiError::Validation(format!("Invalid student id: {}", raw)))
    }
}

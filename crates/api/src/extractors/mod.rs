//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data. Rejections are
//! reported as [`crate::error::ApiError`] so every failure shares the JSON
//! error body.

pub mod json;
pub mod student_id;

pub use json::ApiJson;
pub use student_id::StudentId;

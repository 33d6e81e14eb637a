//! Domain layer for the Student Registry backend.
//!
//! This crate contains:
//! - Domain models (Student)
//! - Request/response payloads for the HTTP surface

pub mod models;

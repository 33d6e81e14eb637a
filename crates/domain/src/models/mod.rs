//! Domain models for the Student Registry.

pub mod student;

pub use student::{Student, StudentFields, StudentRequest, StudentResponse};

//! Repository implementations for database operations.

pub mod student;

pub use student::StudentRepository;

//! Persistence layer for the Student Registry backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - The `StudentStore` gateway trait and its implementations

pub mod db;
pub mod entities;
pub mod memory;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use memory::InMemoryStudentStore;
pub use repositories::StudentRepository;
pub use store::{StoreError, StoreResult, StudentStore};

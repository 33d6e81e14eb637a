//! Shared utilities and common types for the Student Registry backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Field validation helpers usable from `#[validate(custom(...))]`
//! - Identifier parsing

pub mod validation;

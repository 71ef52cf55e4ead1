//! Shared geometry and error types.

pub mod core;
pub mod error;

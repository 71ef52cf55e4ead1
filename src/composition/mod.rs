//! Reel configuration model and builder.

pub mod dsl;
pub mod model;

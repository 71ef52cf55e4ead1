//! Host implementations.

/// In-memory host for tests and the CLI.
pub mod memory;
/// Browser host and `wasm-bindgen` entry point.
#[cfg(target_arch = "wasm32")]
pub mod web;

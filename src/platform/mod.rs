//! Platform abstraction layer
//!
//! Browser wiring for running the field as a page background:
//! - Canvas lookup/creation
//! - `requestAnimationFrame` loop
//! - Resize and pointer listeners
//!
//! Native builds drive [`Engine`](crate::Engine) directly (see `main.rs`).

#[cfg(target_arch = "wasm32")]
pub mod web;

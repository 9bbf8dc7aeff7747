//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, pointer/touch, gamepad)
//! - The wasm-bindgen surface the page's game engine talks to

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::InputMapper;

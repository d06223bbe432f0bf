//! Rendering module
//!
//! `scene` turns the session into draw commands; the wasm-only `canvas`
//! backend executes them on a 2D canvas context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{Align, DrawCmd, Sprite, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasBackend;

//! Sketchboard Web
//!
//! Browser host: binds the drawing surface to a `<canvas>` element and
//! forwards DOM input to it.

mod shortcuts;

pub use shortcuts::{Command, Shortcut, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{SketchBoard, start};

//! Sketchboard Render Library
//!
//! Hand-drawn stroke generation and a retained scene that implements the
//! core render surface.

mod renderer;
pub mod sketch;

pub use renderer::{DrawCommand, RenderStyle, Scene, SceneSurface, css_color};
pub use sketch::{Sketch, SketchGenerator, SketchOptions, generate_seed, hand_drawn};

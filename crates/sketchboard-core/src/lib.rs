//! Sketchboard Core Library
//!
//! Platform-agnostic shape model, geometry, undo history and the pointer
//! interaction state machine for the sketchboard drawing surface.

pub mod canvas;
pub mod config;
pub mod document;
pub mod geometry;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod surface;
pub mod tools;

#[cfg(test)]
mod testing;

pub use canvas::{Canvas, Interaction, Response};
pub use config::EditorConfig;
pub use document::ShapeCollection;
pub use history::{Edit, History, HistoryEntry};
pub use input::{Cursor, MouseButton, PointerEvent, PointerPhase};
pub use selection::{Corner, Node, NodeKind, Selection, SelectionHighlight};
pub use shapes::{Anchors, Geometry, Shape, ShapeError, ShapeId, ShapeKind, ShapeRecord};
pub use surface::{RenderSurface, SurfaceError};
pub use tools::{ToolError, ToolKind};

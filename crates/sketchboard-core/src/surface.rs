//! Render surface abstraction.
//!
//! The editor never paints directly. It hands shape geometry to a
//! [`RenderSurface`], which turns it into an opaque handle and later draws
//! that handle. Backends are free to bake randomness into handles, so a
//! handle is only ever valid for the anchors it was generated from.

use crate::selection::SelectionHighlight;
use crate::shapes::Geometry;
use thiserror::Error;

/// Errors reported by a render surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Render surface is not attached")]
    NotAttached,
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// A backend that can turn geometry into drawable handles and paint them.
pub trait RenderSurface {
    /// Opaque drawable produced for one shape.
    type Handle: Clone;

    /// Whether the surface is attached to something it can paint on.
    fn is_ready(&self) -> bool;

    /// Build a fresh handle for the given geometry.
    fn generate(&mut self, geometry: &Geometry) -> Result<Self::Handle, SurfaceError>;

    /// Clear everything painted so far.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Paint one handle.
    fn draw(&mut self, handle: &Self::Handle) -> Result<(), SurfaceError>;

    /// Paint the selection outline and its nodes.
    fn draw_highlight(&mut self, highlight: &SelectionHighlight) -> Result<(), SurfaceError>;
}

//! Retained scene surface.
//!
//! [`SceneSurface`] implements the core render surface by recording draw
//! commands into a [`Scene`]. Hosts replay the scene onto whatever 2D
//! context they own.

use crate::sketch::{Sketch, SketchGenerator, SketchOptions};
use kurbo::BezPath;
use log::trace;
use peniko::Color;
use sketchboard_core::selection::SelectionHighlight;
use sketchboard_core::shapes::Geometry;
use sketchboard_core::surface::{RenderSurface, SurfaceError};

/// Colours and sizes used when painting.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub highlight_color: Color,
    pub highlight_width: f64,
    pub node_fill: Color,
    /// Side length of a selection node.
    pub node_size: f64,
    pub background: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            stroke_width: 1.5,
            highlight_color: Color::from_rgba8(0xb7, 0xb5, 0xed, 255),
            highlight_width: 2.0,
            node_fill: Color::from_rgba8(255, 255, 255, 255),
            node_size: 8.0,
            background: Color::from_rgba8(255, 255, 255, 255),
        }
    }
}

/// Format a colour as a CSS `rgba()` string.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!(
        "rgba({}, {}, {}, {})",
        rgba.r,
        rgba.g,
        rgba.b,
        f64::from(rgba.a) / 255.0
    )
}

/// One recorded paint operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear,
    Stroke(BezPath),
    Highlight(SelectionHighlight),
}

/// Paint operations since the last clear.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of stroke commands.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke(_)))
            .count()
    }
}

/// Render surface that sketches shapes and records them into a [`Scene`].
///
/// The surface starts detached; it refuses to generate or paint until
/// [`SceneSurface::attach`] is called.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    generator: SketchGenerator,
    style: RenderStyle,
    scene: Scene,
    attached: bool,
}

impl SceneSurface {
    pub fn new(options: SketchOptions, style: RenderStyle) -> Self {
        Self {
            generator: SketchGenerator::new(options),
            style,
            scene: Scene::new(),
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    fn ensure_attached(&self) -> Result<(), SurfaceError> {
        if self.attached {
            Ok(())
        } else {
            Err(SurfaceError::NotAttached)
        }
    }
}

impl RenderSurface for SceneSurface {
    type Handle = Sketch;

    fn is_ready(&self) -> bool {
        self.attached
    }

    fn generate(&mut self, geometry: &Geometry) -> Result<Sketch, SurfaceError> {
        self.ensure_attached()?;
        let sketch = self.generator.generate(geometry);
        trace!("Sketched {} with seed {}", geometry.kind(), sketch.seed);
        Ok(sketch)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.scene.reset();
        self.scene.push(DrawCommand::Clear);
        Ok(())
    }

    fn draw(&mut self, handle: &Sketch) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        for stroke in &handle.strokes {
            self.scene.push(DrawCommand::Stroke(stroke.clone()));
        }
        Ok(())
    }

    fn draw_highlight(&mut self, highlight: &SelectionHighlight) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.scene.push(DrawCommand::Highlight(highlight.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchboard_core::input::PointerEvent;
    use sketchboard_core::shapes::{Anchors, ShapeKind};
    use sketchboard_core::tools::ToolKind;
    use sketchboard_core::Canvas;

    fn attached() -> SceneSurface {
        let mut surface = SceneSurface::default();
        surface.attach();
        surface
    }

    #[test]
    fn test_detached_surface_refuses() {
        let mut surface = SceneSurface::default();
        let geometry = Geometry::from_anchors(ShapeKind::Line, Anchors::new(0.0, 0.0, 1.0, 1.0));
        assert!(matches!(surface.generate(&geometry), Err(SurfaceError::NotAttached)));
        assert!(matches!(surface.clear(), Err(SurfaceError::NotAttached)));
    }

    #[test]
    fn test_clear_resets_scene() {
        let mut surface = attached();
        let geometry = Geometry::from_anchors(ShapeKind::Circle, Anchors::new(0.0, 0.0, 10.0, 0.0));
        let sketch = surface.generate(&geometry).unwrap();
        surface.draw(&sketch).unwrap();
        assert_eq!(surface.scene().stroke_count(), 2);

        surface.clear().unwrap();
        assert_eq!(surface.scene().commands().len(), 1);
        assert!(matches!(surface.scene().commands()[0], DrawCommand::Clear));
    }

    #[test]
    fn test_canvas_drives_scene() {
        let mut canvas = Canvas::new(attached());
        canvas.set_tool(ToolKind::Rectangle);
        canvas.dispatch(PointerEvent::down(Point::new(10.0, 10.0)));
        canvas.dispatch(PointerEvent::moved(Point::new(50.0, 40.0)));
        // Preview is painted before commit.
        assert_eq!(canvas.surface().scene().stroke_count(), 2);
        canvas.dispatch(PointerEvent::up(Point::new(60.0, 50.0)));
        assert_eq!(canvas.shapes().len(), 1);
        assert_eq!(canvas.surface().scene().stroke_count(), 2);

        canvas.set_tool(ToolKind::Select);
        canvas.dispatch(PointerEvent::down(Point::new(30.0, 30.0)));
        let highlights = canvas
            .surface()
            .scene()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Highlight(_)))
            .count();
        assert_eq!(highlights, 1);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(RenderStyle::default().highlight_color), "rgba(183, 181, 237, 1)");
    }
}

//! The interactive canvas: tool state, pointer gestures, selection and history.

use crate::config::EditorConfig;
use crate::document::ShapeCollection;
use crate::geometry::{normalized, resized_anchors, rotate_anchors, sweep_angle};
use crate::history::{Edit, History, HistoryEntry};
use crate::input::{Cursor, MouseButton, PointerEvent, PointerPhase};
use crate::selection::{Corner, NodeKind, Selection, SelectionHighlight, highlight, node_at, on_falling_diagonal};
use crate::shapes::{Anchors, Shape, ShapeId, ShapeKind};
use crate::surface::{RenderSurface, SurfaceError};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};
use log::{debug, trace, warn};

/// What the current pointer gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Dragging out a new shape from `anchor`.
    Drawing { kind: ShapeKind, anchor: Point },
    /// Translating a shape. `last` is the previous pointer sample.
    Moving { id: ShapeId, last: Point },
    /// Dragging a corner node. `start` holds the anchors at gesture start.
    Resizing {
        id: ShapeId,
        corner: Corner,
        start: Anchors,
    },
    /// Dragging the rotate node. `last` is the previous pointer sample.
    Rotating { id: ShapeId, last: Point },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// Result of dispatching one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    /// Interaction state after the event.
    pub interaction: Interaction,
    /// Cursor the host should show.
    pub cursor: Cursor,
    /// Whether the surface was repainted.
    pub redraw: bool,
}

/// Resize cursor for the node at `corner`, picked from where the node is drawn.
fn resize_cursor<H>(corner: Corner, shape: &Shape<H>, config: &EditorConfig) -> Cursor {
    if on_falling_diagonal(corner, shape, config) {
        Cursor::ResizeNwse
    } else {
        Cursor::ResizeNesw
    }
}

/// The interaction state machine.
///
/// Owns the shape collection, selection and history, and drives the injected
/// render surface. All input arrives through [`Canvas::dispatch`].
pub struct Canvas<R: RenderSurface> {
    surface: R,
    config: EditorConfig,
    tool: ToolKind,
    shapes: ShapeCollection<R::Handle>,
    history: History<R::Handle>,
    selection: Option<Selection>,
    interaction: Interaction,
    /// Uncommitted shape shown while drawing.
    preview: Option<Shape<R::Handle>>,
    /// Edited shape as it was when the gesture started.
    gesture_origin: Option<Shape<R::Handle>>,
    last_position: Point,
}

impl<R: RenderSurface> Canvas<R> {
    /// Create a canvas with the default configuration.
    pub fn new(surface: R) -> Self {
        Self::with_config(surface, EditorConfig::default())
    }

    pub fn with_config(surface: R, config: EditorConfig) -> Self {
        Self {
            surface,
            history: History::with_limit(config.history_limit),
            config,
            tool: ToolKind::default(),
            shapes: ShapeCollection::new(),
            selection: None,
            interaction: Interaction::Idle,
            preview: None,
            gesture_origin: None,
            last_position: Point::ZERO,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read-only view of the shapes in z-order.
    pub fn shapes(&self) -> &ShapeCollection<R::Handle> {
        &self.shapes
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape<R::Handle>> {
        self.selection.and_then(|sel| self.shapes.get(sel.shape_id))
    }

    /// The shape being drawn but not yet committed.
    pub fn preview(&self) -> Option<&Shape<R::Handle>> {
        self.preview.as_ref()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Switch tools. An active gesture is finished first, as if the pointer
    /// had been released where it was last seen.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let mut changed = false;
        if !self.interaction.is_idle() {
            changed |= self.pointer_up(self.last_position);
        }
        if tool.is_drawing_tool() && self.selection.take().is_some() {
            changed = true;
        }
        if tool != self.tool {
            debug!("Tool changed: {} -> {}", self.tool, tool);
            self.tool = tool;
            changed = true;
        }
        if changed {
            self.redraw();
        }
    }

    /// Process one pointer event.
    pub fn dispatch(&mut self, event: PointerEvent) -> Response {
        let position = event.canvas_position();
        let primary = event.button == MouseButton::Left;

        let redraw = match event.phase {
            PointerPhase::Down if primary && self.interaction.is_idle() => self.pointer_down(position),
            PointerPhase::Down => false,
            PointerPhase::Move => self.pointer_move(position),
            PointerPhase::Up if primary => self.pointer_up(position),
            PointerPhase::Up => false,
            PointerPhase::Leave => self.pointer_up(position),
        };
        self.last_position = position;

        if redraw {
            self.redraw();
        }
        Response {
            interaction: self.interaction,
            cursor: self.cursor_at(position),
            redraw,
        }
    }

    /// Undo the last change. Ignored while a gesture is active.
    pub fn undo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            debug!("Ignoring undo during {:?}", self.interaction);
            return false;
        }
        let changed = self.history.undo(&mut self.shapes);
        if changed {
            self.drop_stale_selection();
            self.redraw();
        }
        changed
    }

    /// Redo the last undone change. Ignored while a gesture is active.
    pub fn redo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            debug!("Ignoring redo during {:?}", self.interaction);
            return false;
        }
        let changed = self.history.redo(&mut self.shapes);
        if changed {
            self.drop_stale_selection();
            self.redraw();
        }
        changed
    }

    /// Clear the surface and paint every shape in z-order, then the drawing
    /// preview, then the selection highlight when the select tool is active.
    pub fn redraw(&mut self) {
        if !self.surface.is_ready() {
            trace!("Surface not ready, skipping redraw");
            return;
        }
        let highlight = match self.tool {
            ToolKind::Select => self.selected_shape().map(|shape| highlight(shape, &self.config)),
            _ => None,
        };
        if let Err(err) = self.paint(highlight.as_ref()) {
            warn!("Redraw failed: {err}");
        }
    }

    fn paint(&mut self, highlight: Option<&SelectionHighlight>) -> Result<(), SurfaceError> {
        self.surface.clear()?;
        for shape in self.shapes.iter() {
            self.surface.draw(shape.handle())?;
        }
        if let Some(preview) = &self.preview {
            self.surface.draw(preview.handle())?;
        }
        if let Some(highlight) = highlight {
            self.surface.draw_highlight(highlight)?;
        }
        Ok(())
    }

    /// Cursor for the pointer where it was last seen.
    pub fn cursor(&self) -> Cursor {
        self.cursor_at(self.last_position)
    }

    /// Cursor for the pointer at `position` in the current state.
    pub fn cursor_at(&self, position: Point) -> Cursor {
        match self.interaction {
            Interaction::Drawing { .. } => Cursor::Crosshair,
            Interaction::Moving { .. } => Cursor::Move,
            Interaction::Resizing { id, corner, .. } => self
                .shapes
                .get(id)
                .map_or(Cursor::Default, |shape| resize_cursor(corner, shape, &self.config)),
            Interaction::Rotating { .. } => Cursor::Grabbing,
            Interaction::Idle if self.tool.is_drawing_tool() => Cursor::Crosshair,
            Interaction::Idle => self.hover_cursor(position),
        }
    }

    fn hover_cursor(&self, position: Point) -> Cursor {
        let node = self
            .selected_shape()
            .and_then(|shape| node_at(position, shape, &self.config).map(|node| (shape, node)));
        match node {
            Some((shape, NodeKind::Corner(corner))) => resize_cursor(corner, shape, &self.config),
            Some((_, NodeKind::Rotate)) => Cursor::Grab,
            None if self.shapes.topmost_at(position, self.config.line_hit_tolerance).is_some() => Cursor::Move,
            None => Cursor::Default,
        }
    }

    fn pointer_down(&mut self, position: Point) -> bool {
        if let Some(kind) = self.tool.shape_kind() {
            debug!("Start drawing {kind} at {position:?}");
            self.preview = None;
            self.interaction = Interaction::Drawing { kind, anchor: position };
            return false;
        }

        // Nodes of the current selection take priority over shape bodies.
        let grabbed = self.selected_shape().and_then(|shape| {
            node_at(position, shape, &self.config).map(|node| (shape.clone(), node))
        });
        if let Some((shape, node)) = grabbed {
            let id = shape.id();
            self.interaction = match node {
                NodeKind::Corner(corner) => Interaction::Resizing {
                    id,
                    corner,
                    start: normalized(shape.kind(), shape.anchors()),
                },
                NodeKind::Rotate => Interaction::Rotating { id, last: position },
            };
            debug!("Start {:?} on shape {id}", node);
            self.selection = Some(Selection {
                shape_id: id,
                active_node: Some(node),
            });
            self.gesture_origin = Some(shape);
            return false;
        }

        let hit = self
            .shapes
            .topmost_at(position, self.config.line_hit_tolerance)
            .cloned();
        match hit {
            Some(shape) => {
                let id = shape.id();
                debug!("Start moving shape {id}");
                let changed = self.selection.map(|sel| sel.shape_id) != Some(id);
                self.selection = Some(Selection::new(id));
                self.gesture_origin = Some(shape);
                self.interaction = Interaction::Moving { id, last: position };
                changed
            }
            None => {
                if self.config.clear_selection_on_empty_click {
                    self.selection.take().is_some()
                } else {
                    false
                }
            }
        }
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        match self.interaction {
            Interaction::Idle => false,
            Interaction::Drawing { kind, anchor } => {
                let anchors = Anchors::from_points(anchor, position);
                let preview = match &self.preview {
                    Some(preview) => preview.regenerate(anchors, &mut self.surface),
                    None => Shape::create(kind, anchors, &mut self.surface),
                };
                match preview {
                    Ok(preview) => {
                        self.preview = Some(preview);
                        true
                    }
                    Err(err) => {
                        warn!("Failed to build preview: {err}");
                        false
                    }
                }
            }
            Interaction::Moving { id, last } => {
                let delta: Vec2 = position - last;
                let Some(anchors) = self.shapes.get(id).map(|s| s.anchors().translate(delta)) else {
                    return false;
                };
                let changed = self.regenerate_shape(id, anchors);
                if changed {
                    self.interaction = Interaction::Moving { id, last: position };
                }
                changed
            }
            Interaction::Resizing { id, corner, start } => {
                let Some(kind) = self.shapes.get(id).map(|s| s.kind()) else {
                    return false;
                };
                let anchors = normalized(kind, resized_anchors(position, corner, kind, start));
                self.regenerate_shape(id, anchors)
            }
            Interaction::Rotating { id, last } => {
                let Some(shape) = self.shapes.get(id) else {
                    return false;
                };
                let center = shape.bounds().center();
                let angle = sweep_angle(center, last, position);
                if angle == 0.0 {
                    return false;
                }
                let anchors = rotate_anchors(shape.anchors(), center, angle);
                let changed = self.regenerate_shape(id, anchors);
                if changed {
                    self.interaction = Interaction::Rotating { id, last: position };
                }
                changed
            }
        }
    }

    fn pointer_up(&mut self, position: Point) -> bool {
        match self.interaction {
            Interaction::Idle => false,
            Interaction::Drawing { kind, anchor } => {
                self.interaction = Interaction::Idle;
                self.preview = None;
                self.commit_drawing(kind, Anchors::from_points(anchor, position));
                true
            }
            Interaction::Moving { id, .. } => {
                let moved = self.pointer_move(position);
                self.finish_edit(id, HistoryEntry::Moved);
                moved
            }
            Interaction::Resizing { id, .. } => {
                let resized = self.pointer_move(position);
                self.finish_edit(id, HistoryEntry::Resized);
                resized
            }
            Interaction::Rotating { id, .. } => {
                let rotated = self.pointer_move(position);
                self.finish_edit(id, HistoryEntry::Rotated);
                rotated
            }
        }
    }

    fn commit_drawing(&mut self, kind: ShapeKind, anchors: Anchors) {
        if anchors.is_degenerate() {
            debug!("Discarding zero-size {kind}");
            return;
        }
        match Shape::create(kind, anchors, &mut self.surface) {
            Ok(shape) => {
                debug!("Created {kind} {}", shape.id());
                self.shapes.push(shape.clone());
                self.history.record_create(shape);
            }
            Err(err) => warn!("Failed to create {kind}: {err}"),
        }
    }

    /// End an edit gesture, recording it when the shape actually changed.
    fn finish_edit(&mut self, id: ShapeId, entry: fn(Edit<R::Handle>) -> HistoryEntry<R::Handle>) {
        self.interaction = Interaction::Idle;
        if let Some(selection) = self.selection.as_mut() {
            selection.active_node = None;
        }
        let Some(before) = self.gesture_origin.take() else {
            return;
        };
        let Some(after) = self.shapes.get(id) else {
            warn!("Edited shape {id} disappeared");
            return;
        };
        if after.anchors() != before.anchors() {
            debug!("Recording edit of shape {id}");
            let after = after.clone();
            self.history.record(entry(Edit::new(before, after)));
        }
    }

    /// Replace a shape's anchors, generating a new handle. Returns whether the
    /// shape changed.
    fn regenerate_shape(&mut self, id: ShapeId, anchors: Anchors) -> bool {
        let Some(shape) = self.shapes.get(id) else {
            warn!("Shape {id} not found");
            return false;
        };
        if shape.anchors() == anchors {
            return false;
        }
        match shape.regenerate(anchors, &mut self.surface) {
            Ok(updated) => {
                self.shapes.replace(updated);
                true
            }
            Err(err) => {
                warn!("Failed to regenerate shape {id}: {err}");
                false
            }
        }
    }

    fn drop_stale_selection(&mut self) {
        if let Some(sel) = self.selection {
            if self.shapes.get(sel.shape_id).is_none() {
                self.selection = None;
            }
        }
    }
}

//! Pointer input vocabulary and cursor feedback.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the canvas or capture was lost.
    Leave,
}

/// A pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position in device (client) coordinates.
    pub position: Point,
    /// On-screen offset of the canvas when the event fired.
    pub canvas_offset: Vec2,
    pub button: MouseButton,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Point) -> Self {
        Self {
            phase,
            position,
            canvas_offset: Vec2::ZERO,
            button: MouseButton::Left,
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerPhase::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerPhase::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerPhase::Up, position)
    }

    pub fn leave(position: Point) -> Self {
        Self::new(PointerPhase::Leave, position)
    }

    /// Build an event from DOM values: client coordinates, the canvas's
    /// bounding-rect origin and `MouseEvent.button`.
    pub fn from_dom(phase: PointerPhase, client: Point, canvas_origin: Vec2, button: i16) -> Self {
        Self::new(phase, client)
            .with_offset(canvas_origin)
            .with_button(MouseButton::from_dom(button))
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.canvas_offset = offset;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Position relative to the canvas origin.
    pub fn canvas_position(&self) -> Point {
        self.position - self.canvas_offset
    }
}

/// Cursor shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Move,
    /// Diagonal resize for the top-left and bottom-right corners.
    ResizeNwse,
    /// Diagonal resize for the top-right and bottom-left corners.
    ResizeNesw,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::ResizeNwse => "nwse-resize",
            Cursor::ResizeNesw => "nesw-resize",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

//! Shape definitions for the drawing surface.

mod circle;
mod line;
mod rectangle;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;

use crate::surface::{RenderSurface, SurfaceError};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Shape construction errors.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Unsupported shape kind: {0}")]
    UnsupportedShapeKind(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// The kinds of shape the editor can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// All drawable kinds.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Line, ShapeKind::Rectangle, ShapeKind::Circle];

    /// Lowercase name, as used by the host UI.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ShapeError::UnsupportedShapeKind(s.to_string()))
    }
}

/// The two anchor points of a shape.
///
/// What the anchors mean depends on the kind: line endpoints, opposite
/// rectangle corners (not necessarily ordered), or a circle's center followed
/// by a point on its edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Anchors {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_points(first: Point, second: Point) -> Self {
        Self::new(first.x, first.y, second.x, second.y)
    }

    /// The `(x1, y1)` anchor.
    pub fn first(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The `(x2, y2)` anchor.
    pub fn second(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Both anchors shifted by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::from_points(self.first() + delta, self.second() + delta)
    }

    /// Anchors re-sorted so that `x1 <= x2` and `y1 <= y2`.
    pub fn sorted(&self) -> Self {
        Self::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    /// Whether both anchors are the same point.
    pub fn is_degenerate(&self) -> bool {
        self.first() == self.second()
    }
}

/// Common geometric queries implemented by every shape form.
pub trait ShapeGeometry {
    /// Get the normalized bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;
}

/// Geometric form of a shape, derived from its kind and anchors.
///
/// This is also the descriptor handed to the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Geometry {
    /// Derive the geometry for `kind` from a pair of anchors.
    pub fn from_anchors(kind: ShapeKind, anchors: Anchors) -> Self {
        let (first, second) = (anchors.first(), anchors.second());
        match kind {
            ShapeKind::Line => Geometry::Line(Line::new(first, second)),
            ShapeKind::Rectangle => Geometry::Rectangle(Rectangle::from_corners(first, second)),
            ShapeKind::Circle => Geometry::Circle(Circle::through(first, second)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Line(s) => s.bounds(),
            Geometry::Rectangle(s) => s.bounds(),
            Geometry::Circle(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Geometry::Line(s) => s.hit_test(point, tolerance),
            Geometry::Rectangle(s) => s.hit_test(point, tolerance),
            Geometry::Circle(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Geometry::Line(s) => s.to_path(),
            Geometry::Rectangle(s) => s.to_path(),
            Geometry::Circle(s) => s.to_path(),
        }
    }
}

/// A drawn shape.
///
/// `H` is the render handle produced by the render surface from the shape's
/// anchors. Shapes are never edited in place: [`Shape::regenerate`] returns a
/// new value with a freshly generated handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape<H> {
    id: ShapeId,
    kind: ShapeKind,
    anchors: Anchors,
    handle: H,
}

impl<H> Shape<H> {
    /// Create a new shape with a fresh id, generating its handle on `surface`.
    pub fn create<R>(kind: ShapeKind, anchors: Anchors, surface: &mut R) -> Result<Self, ShapeError>
    where
        R: RenderSurface<Handle = H>,
    {
        let handle = surface.generate(&Geometry::from_anchors(kind, anchors))?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            anchors,
            handle,
        })
    }

    /// Return a copy of this shape moved to new anchors, with a new handle.
    pub fn regenerate<R>(&self, anchors: Anchors, surface: &mut R) -> Result<Self, ShapeError>
    where
        R: RenderSurface<Handle = H>,
    {
        let handle = surface.generate(&Geometry::from_anchors(self.kind, anchors))?;
        Ok(Self {
            id: self.id,
            kind: self.kind,
            anchors,
            handle,
        })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// The render handle generated for the current anchors.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::from_anchors(self.kind, self.anchors)
    }

    pub fn bounds(&self) -> Rect {
        self.geometry().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.geometry().hit_test(point, tolerance)
    }

    /// The handle-free view of this shape.
    pub fn record(&self) -> ShapeRecord {
        ShapeRecord {
            id: self.id,
            kind: self.kind,
            anchors: self.anchors,
        }
    }
}

/// Serializable view of a shape without its render handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub kind: ShapeKind,
    #[serde(flatten)]
    pub anchors: Anchors,
}

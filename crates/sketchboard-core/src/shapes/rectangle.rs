//! Rectangle geometry.

use super::ShapeGeometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
///
/// `width` and `height` are signed: a rectangle dragged up or to the left of
/// its origin has negative extents, exactly as the anchors describe it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// The first anchor corner.
    pub origin: Point,
    /// Signed horizontal extent from `origin`.
    pub width: f64,
    /// Signed vertical extent from `origin`.
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Create a rectangle from two opposite corners, without reordering them.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(p1, p2.x - p1.x, p2.y - p1.y)
    }

    /// The corner opposite to `origin`.
    pub fn far_corner(&self) -> Point {
        self.origin + Vec2::new(self.width, self.height)
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.origin, self.far_corner())
    }
}

impl ShapeGeometry for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    /// Inclusive containment in the normalized box. The tolerance is unused:
    /// rectangles hit anywhere inside, edges included.
    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

//! Circle geometry.

use super::ShapeGeometry;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle described by its center and diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point (first anchor).
    pub center: Point,
    /// Diameter: twice the distance between the two anchors.
    pub diameter: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, diameter: f64) -> Self {
        Self { center, diameter }
    }

    /// Create a circle centered on `center` whose edge passes through `edge`.
    pub fn through(center: Point, edge: Point) -> Self {
        Self::new(center, 2.0 * center.distance(edge))
    }

    /// Radius of the circle.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius())
    }
}

impl ShapeGeometry for Circle {
    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        self.center.distance(point) <= self.radius()
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

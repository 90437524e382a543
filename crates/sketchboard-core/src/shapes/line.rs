//! Line geometry.

use super::ShapeGeometry;
use crate::geometry::point_to_line_dist;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight line between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point (first anchor).
    pub start: Point,
    /// End point (second anchor).
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl ShapeGeometry for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Hit if the point lies within `tolerance` of the infinite line through
    /// both endpoints. The distance is not clamped to the segment, so points
    /// on the line's extension beyond either endpoint also hit.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_line_dist(point, self.start, self.end) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_tolerance() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 4.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 6.0), 5.0));
    }

    #[test]
    fn test_hit_test_beyond_segment() {
        // Collinear points past the endpoints still register.
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(250.0, 1.0), 5.0));
        assert!(line.hit_test(Point::new(-80.0, -2.0), 5.0));
    }

    #[test]
    fn test_bounds_unordered() {
        let line = Line::new(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_path_has_two_points() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(line.to_path().elements().len(), 2);
    }
}

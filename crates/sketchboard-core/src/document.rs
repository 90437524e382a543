//! The ordered shape collection.

use crate::shapes::{Shape, ShapeId, ShapeRecord};
use kurbo::Point;

/// Ordered sequence of shapes. Insertion order is z-order: later shapes are
/// drawn on top.
#[derive(Debug, Clone)]
pub struct ShapeCollection<H> {
    shapes: Vec<Shape<H>>,
}

impl<H> Default for ShapeCollection<H> {
    fn default() -> Self {
        Self { shapes: Vec::new() }
    }
}

impl<H> ShapeCollection<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of all others.
    pub fn push(&mut self, shape: Shape<H>) {
        self.shapes.push(shape);
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape<H>> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Replace the shape with the same id, keeping its z-position.
    /// Returns the previous value, or `None` if no such shape exists.
    pub fn replace(&mut self, shape: Shape<H>) -> Option<Shape<H>> {
        let index = self.index_of(shape.id())?;
        Some(std::mem::replace(&mut self.shapes[index], shape))
    }

    /// Remove a shape by id.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape<H>> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    /// Shapes in z-order, bottom first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape<H>> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The front-most shape hit at `point`.
    pub fn topmost_at(&self, point: Point, tolerance: f64) -> Option<&Shape<H>> {
        self.shapes.iter().rev().find(|s| s.hit_test(point, tolerance))
    }

    pub fn records(&self) -> Vec<ShapeRecord> {
        self.shapes.iter().map(Shape::record).collect()
    }

    /// Serialize the handle-free records as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Anchors, ShapeKind};
    use crate::testing::{RecordingSurface, TestHandle};

    fn shape(kind: ShapeKind, anchors: Anchors, surface: &mut RecordingSurface) -> Shape<TestHandle> {
        Shape::create(kind, anchors, surface).unwrap()
    }

    #[test]
    fn test_topmost_is_last_drawn() {
        let mut surface = RecordingSurface::new();
        let mut shapes = ShapeCollection::new();
        let below = shape(ShapeKind::Rectangle, Anchors::new(0.0, 0.0, 100.0, 100.0), &mut surface);
        let above = shape(ShapeKind::Rectangle, Anchors::new(50.0, 50.0, 150.0, 150.0), &mut surface);
        shapes.push(below.clone());
        shapes.push(above.clone());

        assert_eq!(shapes.topmost_at(Point::new(75.0, 75.0), 5.0).map(|s| s.id()), Some(above.id()));
        assert_eq!(shapes.topmost_at(Point::new(10.0, 10.0), 5.0).map(|s| s.id()), Some(below.id()));
        assert!(shapes.topmost_at(Point::new(500.0, 500.0), 5.0).is_none());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut surface = RecordingSurface::new();
        let mut shapes = ShapeCollection::new();
        let a = shape(ShapeKind::Line, Anchors::new(0.0, 0.0, 10.0, 0.0), &mut surface);
        let b = shape(ShapeKind::Line, Anchors::new(0.0, 5.0, 10.0, 5.0), &mut surface);
        shapes.push(a.clone());
        shapes.push(b.clone());

        let moved = a.regenerate(Anchors::new(1.0, 1.0, 11.0, 1.0), &mut surface).unwrap();
        let previous = shapes.replace(moved.clone()).unwrap();

        assert_eq!(previous.anchors(), a.anchors());
        assert_eq!(shapes.index_of(a.id()), Some(0));
        assert_eq!(shapes.get(a.id()).unwrap().anchors(), moved.anchors());
    }

    #[test]
    fn test_remove() {
        let mut surface = RecordingSurface::new();
        let mut shapes = ShapeCollection::new();
        let a = shape(ShapeKind::Circle, Anchors::new(0.0, 0.0, 10.0, 0.0), &mut surface);
        shapes.push(a.clone());

        assert!(shapes.remove(a.id()).is_some());
        assert!(shapes.is_empty());
        assert!(shapes.remove(a.id()).is_none());
    }

    #[test]
    fn test_to_json() {
        let mut surface = RecordingSurface::new();
        let mut shapes = ShapeCollection::new();
        shapes.push(shape(ShapeKind::Rectangle, Anchors::new(0.0, 0.0, 10.0, 10.0), &mut surface));
        let json: serde_json::Value = serde_json::from_str(&shapes.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "rectangle");
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }
}

//! Selection state and the resize/rotate nodes drawn around a selected shape.

use crate::config::EditorConfig;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corners in hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The point of `frame` at this corner.
    pub fn of(self, frame: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(frame.x0, frame.y0),
            Corner::TopRight => Point::new(frame.x1, frame.y0),
            Corner::BottomLeft => Point::new(frame.x0, frame.y1),
            Corner::BottomRight => Point::new(frame.x1, frame.y1),
        }
    }
}

/// Type of selection node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Resize node at a corner.
    Corner(Corner),
    /// Rotation node above the shape.
    Rotate,
}

/// A node with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Point,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(position: Point, kind: NodeKind) -> Self {
        Self { position, kind }
    }

    /// Square hit area: both axes within `tolerance`.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance && (point.y - self.position.y).abs() <= tolerance
    }
}

/// The frame the nodes sit on.
///
/// Lines use their raw anchors so that each corner node sits on the anchor it
/// resizes. Rectangles and circles use their bounds grown by the highlight
/// offset.
fn frame<H>(shape: &Shape<H>, config: &EditorConfig) -> Rect {
    match shape.kind() {
        ShapeKind::Line => {
            let a = shape.anchors();
            Rect {
                x0: a.x1,
                y0: a.y1,
                x1: a.x2,
                y1: a.y2,
            }
        }
        ShapeKind::Rectangle | ShapeKind::Circle => {
            shape.bounds().inflate(config.highlight_offset, config.highlight_offset)
        }
    }
}

/// Get the nodes of a shape in hit-test order: top-left, top-right,
/// bottom-left, bottom-right, then rotate.
pub fn nodes_for<H>(shape: &Shape<H>, config: &EditorConfig) -> Vec<Node> {
    let frame = frame(shape, config);
    let mut nodes: Vec<Node> = Corner::ALL
        .into_iter()
        .map(|corner| Node::new(corner.of(frame), NodeKind::Corner(corner)))
        .collect();

    if config.rotate_node_enabled && shape.kind() != ShapeKind::Circle {
        let top = frame.y0.min(frame.y1);
        let center_x = (frame.x0 + frame.x1) / 2.0;
        nodes.push(Node::new(
            Point::new(center_x, top - config.rotate_node_offset),
            NodeKind::Rotate,
        ));
    }
    nodes
}

/// Whether the node for `corner` sits on the frame's top-left to bottom-right
/// diagonal as drawn. A line frame follows its anchors, so a corner's name
/// need not match where its node appears.
pub fn on_falling_diagonal<H>(corner: Corner, shape: &Shape<H>, config: &EditorConfig) -> bool {
    let frame = frame(shape, config);
    let node = corner.of(frame);
    let center = frame.center();
    (node.x - center.x) * (node.y - center.y) >= 0.0
}

/// Find which node (if any) is hit at the given point. The first match wins.
pub fn node_at<H>(point: Point, shape: &Shape<H>, config: &EditorConfig) -> Option<NodeKind> {
    nodes_for(shape, config)
        .into_iter()
        .find(|node| node.hit_test(point, config.node_hit_tolerance))
        .map(|node| node.kind)
}

/// The currently selected shape and the node being dragged, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub shape_id: ShapeId,
    pub active_node: Option<NodeKind>,
}

impl Selection {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            active_node: None,
        }
    }
}

/// Outline and nodes drawn over the selected shape.
#[derive(Debug, Clone)]
pub struct SelectionHighlight {
    pub outline: BezPath,
    pub nodes: Vec<Node>,
}

/// Build the highlight for a selected shape.
pub fn highlight<H>(shape: &Shape<H>, config: &EditorConfig) -> SelectionHighlight {
    let outline = match shape.kind() {
        ShapeKind::Line => shape.geometry().to_path(),
        ShapeKind::Rectangle | ShapeKind::Circle => frame(shape, config).to_path(0.1),
    };
    SelectionHighlight {
        outline,
        nodes: nodes_for(shape, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Anchors;
    use crate::testing::{RecordingSurface, TestHandle};

    fn create(kind: ShapeKind, anchors: Anchors) -> Shape<TestHandle> {
        let mut surface = RecordingSurface::new();
        Shape::create(kind, anchors, &mut surface).unwrap()
    }

    #[test]
    fn test_rectangle_nodes_on_offset_frame() {
        let config = EditorConfig::default();
        let rect = create(ShapeKind::Rectangle, Anchors::new(10.0, 10.0, 50.0, 50.0));
        let nodes = nodes_for(&rect, &config);
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].position, Point::new(6.0, 6.0));
        assert_eq!(nodes[0].kind, NodeKind::Corner(Corner::TopLeft));
        assert_eq!(nodes[3].position, Point::new(54.0, 54.0));
        assert_eq!(nodes[4].kind, NodeKind::Rotate);
        assert_eq!(nodes[4].position, Point::new(30.0, 6.0 - config.rotate_node_offset));
    }

    #[test]
    fn test_line_nodes_follow_anchors() {
        let config = EditorConfig::default();
        let line = create(ShapeKind::Line, Anchors::new(100.0, 0.0, 0.0, 50.0));
        let nodes = nodes_for(&line, &config);
        assert_eq!(nodes[0].position, Point::new(100.0, 0.0));
        assert_eq!(nodes[3].position, Point::new(0.0, 50.0));
    }

    #[test]
    fn test_circle_has_no_rotate_node() {
        let config = EditorConfig::default();
        let circle = create(ShapeKind::Circle, Anchors::new(0.0, 0.0, 10.0, 0.0));
        let nodes = nodes_for(&circle, &config);
        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|n| n.kind != NodeKind::Rotate));
    }

    #[test]
    fn test_node_at() {
        let config = EditorConfig::default();
        let rect = create(ShapeKind::Rectangle, Anchors::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(
            node_at(Point::new(8.0, 12.0), &rect, &config),
            Some(NodeKind::Corner(Corner::TopLeft))
        );
        assert_eq!(
            node_at(Point::new(55.0, 5.0), &rect, &config),
            Some(NodeKind::Corner(Corner::TopRight))
        );
        assert_eq!(node_at(Point::new(30.0, -16.0), &rect, &config), Some(NodeKind::Rotate));
        assert_eq!(node_at(Point::new(30.0, 30.0), &rect, &config), None);
    }

    #[test]
    fn test_node_at_first_match_wins() {
        // Nodes of a tiny rectangle overlap; enumeration order decides.
        let config = EditorConfig::default();
        let rect = create(ShapeKind::Rectangle, Anchors::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(
            node_at(Point::new(1.0, 1.0), &rect, &config),
            Some(NodeKind::Corner(Corner::TopLeft))
        );
    }

    #[test]
    fn test_falling_diagonal_follows_drawn_position() {
        let config = EditorConfig::default();
        let rect = create(ShapeKind::Rectangle, Anchors::new(10.0, 10.0, 50.0, 50.0));
        assert!(on_falling_diagonal(Corner::TopLeft, &rect, &config));
        assert!(!on_falling_diagonal(Corner::BottomLeft, &rect, &config));

        // Drawn from bottom-left to top-right: the "top-left" node is at (0, 100).
        let line = create(ShapeKind::Line, Anchors::new(0.0, 100.0, 100.0, 0.0));
        assert!(!on_falling_diagonal(Corner::TopLeft, &line, &config));
        assert!(!on_falling_diagonal(Corner::BottomRight, &line, &config));
        assert!(on_falling_diagonal(Corner::TopRight, &line, &config));
    }

    #[test]
    fn test_rotate_node_disabled() {
        let config = EditorConfig {
            rotate_node_enabled: false,
            ..Default::default()
        };
        let rect = create(ShapeKind::Rectangle, Anchors::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(nodes_for(&rect, &config).len(), 4);
    }

    #[test]
    fn test_highlight() {
        let config = EditorConfig::default();
        let rect = create(ShapeKind::Rectangle, Anchors::new(10.0, 10.0, 50.0, 50.0));
        let highlight = highlight(&rect, &config);
        assert_eq!(highlight.nodes.len(), 5);
        let bounds = highlight.outline.bounding_box();
        assert!((bounds.x0 - 6.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 54.0).abs() < f64::EPSILON);
    }
}

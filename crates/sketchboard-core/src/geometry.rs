//! Coordinate math shared by hit-testing and the editing gestures.

use crate::selection::Corner;
use crate::shapes::{Anchors, Shape, ShapeKind};
use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Maximum distance from a line at which a point still counts as a hit.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Perpendicular distance from `point` to the infinite line through `a` and `b`.
///
/// A zero-length line falls back to the distance from `a`.
pub fn point_to_line_dist(point: Point, a: Point, b: Point) -> f64 {
    let dir = b - a;
    let len = dir.hypot();
    if len == 0.0 {
        return distance(point, a);
    }
    dir.cross(point - a).abs() / len
}

/// Hit-test a shape using the default tolerances.
pub fn contains_point<H>(shape: &Shape<H>, point: Point) -> bool {
    shape.hit_test(point, LINE_HIT_TOLERANCE)
}

/// Replace the anchors tied to `corner` with `point`, leaving the opposite
/// anchors where they are.
///
/// Rectangle and line anchors map directly onto corners. A circle keeps its
/// center and moves its second anchor so that the corner of its bounding box
/// follows the pointer. The result is not normalized.
pub fn resized_anchors(point: Point, corner: Corner, kind: ShapeKind, anchors: Anchors) -> Anchors {
    match kind {
        ShapeKind::Line | ShapeKind::Rectangle => {
            let mut out = anchors;
            match corner {
                Corner::TopLeft => {
                    out.x1 = point.x;
                    out.y1 = point.y;
                }
                Corner::TopRight => {
                    out.x2 = point.x;
                    out.y1 = point.y;
                }
                Corner::BottomLeft => {
                    out.x1 = point.x;
                    out.y2 = point.y;
                }
                Corner::BottomRight => {
                    out.x2 = point.x;
                    out.y2 = point.y;
                }
            }
            out
        }
        ShapeKind::Circle => {
            let center = anchors.first();
            let radius = (point.x - center.x).abs().max((point.y - center.y).abs());
            let dir = anchors.second() - center;
            let len = dir.hypot();
            let unit = if len == 0.0 { Vec2::new(1.0, 0.0) } else { dir / len };
            Anchors::from_points(center, center + unit * radius)
        }
    }
}

/// Re-sort anchors so a rectangle's first anchor is its top-left corner.
///
/// Lines and circles are returned unchanged: swapping their coordinates would
/// change the shape they describe.
pub fn normalized(kind: ShapeKind, anchors: Anchors) -> Anchors {
    match kind {
        ShapeKind::Rectangle => anchors.sorted(),
        ShapeKind::Line | ShapeKind::Circle => anchors,
    }
}

/// Rotate a point around `center` by `angle` radians.
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let offset = point - center;
    let r = offset.hypot();
    let theta = offset.atan2();
    Point::new(center.x + r * (theta + angle).cos(), center.y + r * (theta + angle).sin())
}

/// Rotate both anchors around `center` by `angle` radians.
pub fn rotate_anchors(anchors: Anchors, center: Point, angle: f64) -> Anchors {
    Anchors::from_points(
        rotate_point(anchors.first(), center, angle),
        rotate_point(anchors.second(), center, angle),
    )
}

/// Signed angle swept around `center` moving from `from` to `to`, in (-π, π].
pub fn sweep_angle(center: Point, from: Point, to: Point) -> f64 {
    let a = (from - center).atan2();
    let b = (to - center).atan2();
    let mut delta = b - a;
    if delta > PI {
        delta -= 2.0 * PI;
    } else if delta <= -PI {
        delta += 2.0 * PI;
    }
    delta
}

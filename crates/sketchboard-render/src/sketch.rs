//! Hand-drawn stroke generation.
//!
//! Every call to [`SketchGenerator::generate`] draws a fresh seed, so the same
//! geometry regenerated twice gets different jitter. A seed reproduces its
//! strokes exactly via [`SketchGenerator::generate_with_seed`].

use kurbo::{BezPath, PathEl, Point};
use serde::{Deserialize, Serialize};
use sketchboard_core::shapes::Geometry;
use std::sync::atomic::{AtomicU32, Ordering};

/// Generate a fresh seed for a sketch.
/// Uses a simple counter + hash approach that works on all platforms including WASM.
pub fn generate_seed() -> u32 {
    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-like mixing
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Seeded xorshift32 generator.
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random float in range [-1, 1]
    fn next_f64(&mut self) -> f64 {
        (f64::from(self.next_u32()) / f64::from(u32::MAX)) * 2.0 - 1.0
    }

    fn offset(&mut self, amount: f64) -> f64 {
        self.next_f64() * amount
    }

    fn jitter(&mut self, p: Point, amount: f64) -> Point {
        Point::new(p.x + self.offset(amount), p.y + self.offset(amount))
    }
}

/// Tuning for the hand-drawn look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchOptions {
    /// 0 = clean, 1 = slight wobble, 2 = very sketchy.
    pub roughness: f64,
    /// How far straight segments bow away from a straight line.
    pub bowing: f64,
    /// Maximum endpoint displacement at roughness 1.
    pub max_randomness_offset: f64,
    /// Draw each outline twice with different jitter.
    pub multi_stroke: bool,
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            max_randomness_offset: 2.0,
            multi_stroke: true,
        }
    }
}

/// Apply the hand-drawn effect to a path.
///
/// Endpoints are randomly offset so strokes overshoot at corners, and straight
/// segments become quadratic curves bowed at their midpoint. Each
/// `stroke_index` gives an unrelated random sequence for the same seed.
pub fn hand_drawn(path: &BezPath, options: &SketchOptions, seed: u32, stroke_index: u32) -> BezPath {
    let roughness = options.roughness;
    if roughness <= 0.0 {
        return path.clone();
    }

    let max_offset = roughness * options.max_randomness_offset;
    let bowing = roughness * options.bowing;

    let combined_seed = seed.wrapping_add(stroke_index.wrapping_mul(99991));
    let mut rng = SimpleRng::new(combined_seed);

    let mut result = BezPath::new();
    let mut last_point = Point::ZERO;

    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                result.move_to(rng.jitter(*p, max_offset));
                last_point = *p;
            }
            PathEl::LineTo(p) => {
                let delta = *p - last_point;
                let len = delta.hypot();

                let bow = rng.offset(bowing * roughness * len / 200.0);
                let perp = if len > 0.001 {
                    kurbo::Vec2::new(-delta.y, delta.x) / len
                } else {
                    kurbo::Vec2::ZERO
                };
                let control = last_point.midpoint(*p) + perp * bow;

                result.quad_to(control, rng.jitter(*p, max_offset));
                last_point = *p;
            }
            PathEl::QuadTo(p1, p2) => {
                let c = rng.jitter(*p1, max_offset * 0.7);
                result.quad_to(c, rng.jitter(*p2, max_offset));
                last_point = *p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let c1 = rng.jitter(*p1, max_offset * 0.5);
                let c2 = rng.jitter(*p2, max_offset * 0.5);
                result.curve_to(c1, c2, rng.jitter(*p3, max_offset));
                last_point = *p3;
            }
            PathEl::ClosePath => {
                result.close_path();
            }
        }
    }

    result
}

/// A rendered shape: the geometry it was built from and its jittered strokes.
#[derive(Debug, Clone)]
pub struct Sketch {
    pub geometry: Geometry,
    pub seed: u32,
    pub strokes: Vec<BezPath>,
}

/// Builds [`Sketch`]es from shape geometry.
#[derive(Debug, Clone, Default)]
pub struct SketchGenerator {
    pub options: SketchOptions,
}

impl SketchGenerator {
    pub fn new(options: SketchOptions) -> Self {
        Self { options }
    }

    /// Build a sketch with a fresh seed.
    pub fn generate(&self, geometry: &Geometry) -> Sketch {
        self.generate_with_seed(geometry, generate_seed())
    }

    pub fn generate_with_seed(&self, geometry: &Geometry, seed: u32) -> Sketch {
        let path = geometry.to_path();
        let passes = if self.options.multi_stroke { 2 } else { 1 };
        let strokes = (0..passes)
            .map(|index| hand_drawn(&path, &self.options, seed, index))
            .collect();
        Sketch {
            geometry: *geometry,
            seed,
            strokes,
        }
    }
}

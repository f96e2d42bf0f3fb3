//! Planar geometry helpers shared by the segmenter, labeler and metrics engine.

use serde::{Deserialize, Serialize};

/// Added to the product of ray lengths so a degenerate (zero-length) ray
/// yields 90 degrees instead of NaN.
const ANGLE_EPSILON: f64 = 1e-8;

/// A point in the normalized image plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Angle in degrees at vertex `b` between the rays b→a and b→c.
///
/// The cosine is clipped to [-1, 1] before `acos` so rounding noise on
/// collinear points cannot produce NaN.
pub fn angle_at_vertex(a: Point2, b: Point2, c: Point2) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);

    let dot = bax * bcx + bay * bcy;
    let norms = (bax * bax + bay * bay).sqrt() * (bcx * bcx + bcy * bcy).sqrt();
    let cos_angle = dot / (norms + ANGLE_EPSILON);

    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sum of distances between consecutive points.
pub fn path_length(points: &[Point2]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

/// Mean distance between consecutive points; 0 with fewer than two points.
pub fn mean_step(points: &[Point2]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    path_length(points) / (points.len() - 1) as f64
}

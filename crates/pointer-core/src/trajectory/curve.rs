//! Curve primitives used by the planner.

use crate::domain::geometry::Point;

/// Ease-out remapping: `1 - (1 - t)^exponent`.
///
/// Maps 0 to 0 and 1 to 1 for any positive exponent.
pub fn ease_out(t: f64, exponent: f64) -> f64 {
    1.0 - (1.0 - t).powf(exponent)
}

/// Evaluates a cubic Bézier curve at parameter `t` in `[0, 1]`.
///
/// B(t) = (1-t)³·P0 + 3(1-t)²·t·P1 + 3(1-t)·t²·P2 + t³·P3
pub fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;

    let x = w0 * f64::from(p0.x) + w1 * f64::from(p1.x) + w2 * f64::from(p2.x) + w3 * f64::from(p3.x);
    let y = w0 * f64::from(p0.y) + w1 * f64::from(p1.y) + w2 * f64::from(p2.y) + w3 * f64::from(p3.y);
    (x, y)
}

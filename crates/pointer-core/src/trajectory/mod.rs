//! Human-like pointer trajectories.
//!
//! A move from `p0` to `p3` is modelled as a cubic Bézier curve whose two
//! control points are pushed off the straight line to the same side, so the
//! path bows in one direction the way a wrist-driven arc does.  The curve
//! parameter is remapped through an ease-out function: the pointer covers
//! most of the distance early and decelerates into the target, more sharply
//! on long moves.
//!
//! # Reference pixels
//!
//! All thresholds are expressed in reference pixels (a 24" 1920×1080
//! monitor).  The planner multiplies the raw pixel distance by the
//! [`TuningFactor`] before comparing it against any threshold, so the same
//! physical move produces the same shape on every display.
//!
//! # Path contract
//!
//! - The last waypoint is always exactly `p3`.
//! - With two or more steps the first waypoint is exactly `p0`; with one
//!   step the path is `[p3]`.
//! - Consecutive waypoints are never equal.
//! - Control points are clamped into the window bounds.  The endpoints are
//!   **not**: if a caller passes an endpoint outside the window, waypoints
//!   near that end of the path will also be outside it.

use rand::Rng;
use tracing::trace;

use crate::calibration::TuningFactor;
use crate::domain::geometry::{Point, Rect};
use crate::domain::speed::Speed;

mod curve;

pub use curve::{cubic_bezier, ease_out};

/// Scaled distance below which the curvature offset range is fixed.
const SHORT_MOVE_THRESHOLD: f64 = 70.0;

/// Fixed `[lo, hi)` curvature offset range for short moves.
const SHORT_MOVE_OFFSET: (i32, i32) = (3, 6);

/// Extra upper margin given to the first control point's offset.
const FIRST_CONTROL_EXTRA: i32 = 50;

/// Waypoints-per-pixel added to every profile for short moves.
const SHORT_MOVE_BOOST: f64 = 0.3;

/// Scaled distance at which the short-move boost starts fading out.
const BOOST_FADE_START: f64 = 100.0;

/// Scaled distance at which the short-move boost has fully faded.
const BOOST_FADE_END: f64 = 2400.0;

/// Easing exponent bounds and the scaled distances that select them.
const EASING_MIN: f64 = 2.0;
const EASING_MAX: f64 = 16.0;
const EASING_NEAR: f64 = 100.0;
const EASING_FAR: f64 = 1200.0;
const EASING_CURVE: f64 = 0.7;

/// Returns `+1.0` or `-1.0` with equal probability.
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Curvature offset range `[lo, hi)` in pixels for a scaled distance.
///
/// Longer moves get proportionally wider arcs.
pub fn offset_range(scaled_distance: f64) -> (i32, i32) {
    if scaled_distance < SHORT_MOVE_THRESHOLD {
        return SHORT_MOVE_OFFSET;
    }
    let lo = (scaled_distance / 6.5).round() as i32;
    (lo, lo + 15)
}

/// Number of curve samples for a move of `distance` raw pixels.
///
/// Never less than one.  For a fixed distance the count is monotonically
/// non-increasing from [`Speed::Slow`] to [`Speed::Fastest`].
pub fn step_count(distance: f64, speed: Speed, tuning: TuningFactor) -> usize {
    if distance <= 0.0 || !distance.is_finite() {
        return 1;
    }
    let scaled = distance * tuning.get();

    // The boost keeps short moves from collapsing into a couple of jumps.
    let fade = ((BOOST_FADE_END - scaled) / (BOOST_FADE_END - BOOST_FADE_START)).clamp(0.0, 1.0);
    let spp = speed.steps_per_pixel() + SHORT_MOVE_BOOST * fade;

    ((scaled * spp).round() as usize).max(1)
}

/// Ease-out exponent for a scaled distance.
///
/// 2 for short moves, 16 for long ones, interpolated along a power curve in
/// between.  Larger exponents decelerate harder near the destination.
pub fn easing_exponent(scaled_distance: f64) -> f64 {
    if scaled_distance <= EASING_NEAR {
        EASING_MIN
    } else if scaled_distance >= EASING_FAR {
        EASING_MAX
    } else {
        let progress = (scaled_distance - EASING_NEAR) / (EASING_FAR - EASING_NEAR);
        EASING_MIN + (EASING_MAX - EASING_MIN) * progress.powf(EASING_CURVE)
    }
}

/// A planned pointer path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    control_points: [Point; 2],
}

impl Path {
    /// The waypoints, in travel order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The two Bézier control points used for this path.
    pub fn control_points(&self) -> [Point; 2] {
        self.control_points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Builds curved, eased waypoint sequences inside one window.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryPlanner {
    bounds: Rect,
    tuning: TuningFactor,
}

impl TrajectoryPlanner {
    /// Creates a planner whose control points are clamped into `bounds`.
    pub fn new(bounds: Rect, tuning: TuningFactor) -> Self {
        Self { bounds, tuning }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn tuning(&self) -> TuningFactor {
        self.tuning
    }

    /// Plans a path from `p0` to `p3`.
    ///
    /// The result is a pure function of the inputs and the values drawn from
    /// `rng`; a seeded generator reproduces the same path.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R, p0: Point, p3: Point, speed: Speed) -> Path {
        let distance = p0.distance_to(p3);
        if distance <= 0.0 {
            return Path {
                points: vec![p3],
                control_points: [p0, p3],
            };
        }
        let scaled = distance * self.tuning.get();

        let direction = random_sign(rng);
        let (lo, hi) = offset_range(scaled);
        let p1_offset = f64::from(rng.random_range(lo..hi + FIRST_CONTROL_EXTRA));
        let p2_offset = f64::from(rng.random_range(lo..hi));

        let p1 = self.point_along_path(rng, p0, p3, 0.2, 0.3, p1_offset, direction);
        let p2 = self.point_along_path(rng, p0, p3, 0.6, 0.7, p2_offset, direction);

        let steps = step_count(distance, speed, self.tuning);
        let exponent = easing_exponent(scaled);

        let mut points: Vec<Point> = Vec::with_capacity(steps);
        for i in 0..steps {
            let t_raw = if steps == 1 {
                1.0
            } else {
                i as f64 / (steps - 1) as f64
            };
            let t = ease_out(t_raw, exponent);
            let (bx, by) = cubic_bezier(p0, p1, p2, p3, t);
            let next = Point::new(bx.round() as i32, by.round() as i32);
            if points.last() != Some(&next) {
                points.push(next);
            }
        }

        trace!(
            ?p0,
            ?p3,
            %speed,
            distance,
            steps,
            waypoints = points.len(),
            exponent,
            "trajectory planned"
        );

        Path {
            points,
            control_points: [p1, p2],
        }
    }

    /// A point part-way along `p0 → p3`, pushed perpendicular to the line.
    ///
    /// The fraction is drawn uniformly from `[lo, hi]`; fractions above 1
    /// extrapolate beyond `p3`.  `offset × direction` pixels of
    /// displacement are applied along the left-hand normal of the segment.
    /// The result is clamped into the planner bounds.  When `p0 == p3` there
    /// is no normal and the base point is returned (clamped).
    #[allow(clippy::too_many_arguments)]
    pub fn point_along_path<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        p0: Point,
        p3: Point,
        lo: f64,
        hi: f64,
        offset: f64,
        direction: f64,
    ) -> Point {
        let dx = f64::from(p3.x - p0.x);
        let dy = f64::from(p3.y - p0.y);
        let len = dx.hypot(dy);
        let (nx, ny) = if len > 0.0 {
            (-dy / len * direction, dx / len * direction)
        } else {
            (0.0, 0.0)
        };

        let t = rng.random_range(lo..=hi);
        let base_x = f64::from(p0.x) + t * dx;
        let base_y = f64::from(p0.y) + t * dy;

        let raw = Point::new(
            (base_x + offset * nx).round() as i32,
            (base_y + offset * ny).round() as i32,
        );
        self.bounds.clamp(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planner() -> TrajectoryPlanner {
        TrajectoryPlanner::new(Rect::new(0, 0, 1920, 1080), TuningFactor::REFERENCE)
    }

    #[test]
    fn test_zero_distance_is_one_step_for_every_speed() {
        for speed in Speed::ALL {
            assert_eq!(step_count(0.0, speed, TuningFactor::REFERENCE), 1);
            assert_eq!(step_count(-4.0, speed, TuningFactor::REFERENCE), 1);
        }
    }

    #[test]
    fn test_zero_distance_path_is_single_endpoint() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Point::new(400, 300);
        let path = planner().plan(&mut rng, p, p, Speed::Fast);
        assert_eq!(path.points(), &[p]);
    }

    #[test]
    fn test_fastest_never_takes_more_steps_than_slow() {
        let tuning = TuningFactor::REFERENCE;
        for d in [1.0, 5.0, 37.5, 100.0, 640.0, 1500.0, 2400.0, 5000.0] {
            let slow = step_count(d, Speed::Slow, tuning);
            let medium = step_count(d, Speed::Medium, tuning);
            let fast = step_count(d, Speed::Fast, tuning);
            let fastest = step_count(d, Speed::Fastest, tuning);
            assert!(slow >= medium && medium >= fast && fast >= fastest, "d = {d}");
        }
    }

    #[test]
    fn test_short_move_boost_applies_below_fade_start() {
        // 50 px, slow: (0.30 + 0.3) * 50 = 30
        assert_eq!(step_count(50.0, Speed::Slow, TuningFactor::REFERENCE), 30);
        // 3000 px, fastest: boost fully faded, 0.05 * 3000 = 150
        assert_eq!(step_count(3000.0, Speed::Fastest, TuningFactor::REFERENCE), 150);
    }

    #[test]
    fn test_step_count_scales_with_tuning_factor() {
        let dense = TuningFactor::new(2.0).unwrap();
        let base = step_count(500.0, Speed::Medium, TuningFactor::REFERENCE);
        let scaled = step_count(500.0, Speed::Medium, dense);
        assert!(scaled > base);
    }

    #[test]
    fn test_easing_exponent_bounds_and_monotonicity() {
        assert_eq!(easing_exponent(0.0), 2.0);
        assert_eq!(easing_exponent(100.0), 2.0);
        assert_eq!(easing_exponent(1200.0), 16.0);
        assert_eq!(easing_exponent(5000.0), 16.0);
        let mut prev = easing_exponent(100.0);
        for d in (150..1200).step_by(50) {
            let e = easing_exponent(d as f64);
            assert!(e > prev && e < 16.0);
            prev = e;
        }
    }

    #[test]
    fn test_offset_range_is_fixed_for_short_moves_and_linear_beyond() {
        assert_eq!(offset_range(10.0), (3, 6));
        assert_eq!(offset_range(69.9), (3, 6));
        assert_eq!(offset_range(650.0), (100, 115));
        let (lo, hi) = offset_range(1300.0);
        assert_eq!((lo, hi), (200, 215));
    }

    #[test]
    fn test_path_starts_at_p0_and_ends_at_p3() {
        let mut rng = StdRng::seed_from_u64(11);
        let p0 = Point::new(100, 100);
        let p3 = Point::new(900, 700);
        for speed in Speed::ALL {
            let path = planner().plan(&mut rng, p0, p3, speed);
            assert!(path.len() >= 2);
            assert_eq!(path.first(), Some(p0));
            assert_eq!(path.last(), Some(p3));
        }
    }

    #[test]
    fn test_single_step_path_is_just_the_target() {
        // 1 px fastest: (0.05 + 0.3) * 1 rounds to 0, floored at 1
        let mut rng = StdRng::seed_from_u64(2);
        let p0 = Point::new(10, 10);
        let p3 = Point::new(11, 10);
        let path = planner().plan(&mut rng, p0, p3, Speed::Fastest);
        assert_eq!(path.points(), &[p3]);
    }

    #[test]
    fn test_consecutive_waypoints_are_distinct() {
        let mut rng = StdRng::seed_from_u64(5);
        let path = planner().plan(&mut rng, Point::new(50, 900), Point::new(1800, 40), Speed::Slow);
        assert!(path.points().windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_control_points_are_clamped_into_bounds() {
        // Window much smaller than the arc the move would want.
        let bounds = Rect::new(200, 200, 300, 120);
        let planner = TrajectoryPlanner::new(bounds, TuningFactor::REFERENCE);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..500 {
            let path = planner.plan(&mut rng, Point::new(210, 210), Point::new(490, 310), Speed::Fast);
            for cp in path.control_points() {
                assert!(bounds.contains(cp), "control point {cp:?} escaped {bounds:?}");
            }
        }
    }

    #[test]
    fn test_endpoints_outside_window_are_not_clamped() {
        let bounds = Rect::new(0, 0, 500, 500);
        let planner = TrajectoryPlanner::new(bounds, TuningFactor::REFERENCE);
        let mut rng = StdRng::seed_from_u64(4);
        let outside = Point::new(900, 900);
        let path = planner.plan(&mut rng, Point::new(10, 10), outside, Speed::Medium);
        assert_eq!(path.last(), Some(outside));
        assert!(!bounds.contains(outside));
    }

    #[test]
    fn test_point_along_path_beyond_target_overshoots() {
        let big = TrajectoryPlanner::new(Rect::new(-5000, -5000, 10_000, 10_000), TuningFactor::REFERENCE);
        let mut rng = StdRng::seed_from_u64(6);
        let p0 = Point::new(0, 0);
        let p3 = Point::new(1000, 0);
        for _ in 0..100 {
            let p = big.point_along_path(&mut rng, p0, p3, 1.04, 1.1, 60.0, 1.0);
            assert!((1040..=1100).contains(&p.x), "{p:?}");
            assert_eq!(p.y, 60);
        }
    }

    #[test]
    fn test_point_along_path_with_coincident_points_returns_base() {
        let mut rng = StdRng::seed_from_u64(6);
        let p = Point::new(300, 300);
        let got = planner().point_along_path(&mut rng, p, p, 0.85, 0.95, 60.0, -1.0);
        assert_eq!(got, p);
    }

    #[test]
    fn test_seeded_planning_is_reproducible() {
        let p0 = Point::new(20, 30);
        let p3 = Point::new(1500, 800);
        let a = planner().plan(&mut StdRng::seed_from_u64(77), p0, p3, Speed::Medium);
        let b = planner().plan(&mut StdRng::seed_from_u64(77), p0, p3, Speed::Medium);
        assert_eq!(a, b);
    }
}

//! Center-biased click point sampling.
//!
//! Humans aim for the middle of a target and land with a roughly normal
//! spread around it.  [`PointSampler`] draws from an independent 2-D Gaussian
//! centered on the rectangle and rejects draws that fall outside it.
//!
//! Each sampler owns its generator.  Callers that need concurrent sampling
//! create one sampler per thread instead of sharing a global generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::domain::geometry::{Point, Rect};

/// Divisor applied to a side length to obtain the standard deviation.
///
/// Large regions get a proportionally tighter spread; small regions a looser
/// one so that the whole target is still reachable.
pub fn deviation(length: f64) -> f64 {
    if length >= 50.0 {
        4.0
    } else if length >= 25.0 {
        7.0
    } else if length >= 15.0 {
        8.0
    } else {
        9.0
    }
}

/// Draws one center-biased point inside `rect` using `rng`.
///
/// Degenerate rectangles (any side < 5 px) return their exact integer center.
pub fn sample_point<R: Rng + ?Sized>(rng: &mut R, rect: &Rect) -> Point {
    if rect.is_degenerate() {
        return rect.center();
    }

    let width = f64::from(rect.width);
    let height = f64::from(rect.height);
    let mean_x = f64::from(rect.x) + width / 2.0;
    let mean_y = f64::from(rect.y) + height / 2.0;

    let (Ok(dist_x), Ok(dist_y)) = (
        Normal::new(mean_x, width / deviation(width)),
        Normal::new(mean_y, height / deviation(height)),
    ) else {
        return rect.center();
    };

    // The distribution is unbounded; resample until the rounded point lands inside.
    loop {
        let candidate = Point::new(
            dist_x.sample(&mut *rng).round() as i32,
            dist_y.sample(&mut *rng).round() as i32,
        );
        if rect.contains(candidate) {
            return candidate;
        }
    }
}

/// A click point sampler that owns its random generator.
#[derive(Debug, Clone)]
pub struct PointSampler<R = StdRng> {
    rng: R,
}

impl PointSampler<StdRng> {
    /// A sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A deterministic sampler, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> PointSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a point inside `rect`, biased toward its center.
    pub fn sample(&mut self, rect: &Rect) -> Point {
        sample_point(&mut self.rng, rect)
    }
}

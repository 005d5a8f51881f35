//! Integer screen geometry shared by every component.
//!
//! Both [`Point`] and [`Rect`] are plain `Copy` values.  Coordinates may be
//! negative (monitors left of or above the primary display); sizes are
//! unsigned.

use serde::{Deserialize, Serialize};

/// Side length (in pixels) below which a rectangle is too small to bias
/// sampling toward its center.
pub const DEGENERATE_SIDE: u32 = 5;

/// A pixel position in screen or client coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other` in pixels.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle.
///
/// `x` and `y` are the top-left corner.  Containment is half-open: the right
/// and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the rightmost X coordinate (exclusive), saturating at
    /// `i32::MAX`.
    pub fn right(&self) -> i32 {
        saturating_edge(self.x, self.width)
    }

    /// Returns the bottommost Y coordinate (exclusive), saturating at
    /// `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        saturating_edge(self.y, self.height)
    }

    /// Returns `true` if `p` lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Integer center, rounding toward the top-left corner.
    pub fn center(&self) -> Point {
        Point::new(
            saturating_edge(self.x, self.width / 2),
            saturating_edge(self.y, self.height / 2),
        )
    }

    /// Returns `true` when either side is shorter than [`DEGENERATE_SIDE`].
    pub fn is_degenerate(&self) -> bool {
        self.width < DEGENERATE_SIDE || self.height < DEGENERATE_SIDE
    }

    /// Returns `true` when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps `p` onto the last pixel row/column inside the rectangle.
    ///
    /// An empty rectangle clamps everything onto its origin.
    pub fn clamp(&self, p: Point) -> Point {
        let max_x = self.right().saturating_sub(1).max(self.x);
        let max_y = self.bottom().saturating_sub(1).max(self.y);
        Point::new(p.x.clamp(self.x, max_x), p.y.clamp(self.y, max_y))
    }

    /// Returns this rectangle moved by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

fn saturating_edge(origin: i32, len: u32) -> i32 {
    let edge = i64::from(origin) + i64::from(len);
    i32::try_from(edge).unwrap_or(i32::MAX)
}

//! Domain value types with no OS or I/O dependencies.
//!
//! Everything here can be compiled and tested on any platform without a
//! display attached.

/// Points and rectangles in pixel space.
pub mod geometry;

/// The four movement speed profiles.
pub mod speed;

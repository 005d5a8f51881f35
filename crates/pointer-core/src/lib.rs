//! # pointer-core
//!
//! Pure numerical and geometric core for driving a virtual pointer the way a
//! person would.  Nothing in this crate touches the OS, a display, or a
//! clock; every random choice is drawn from a generator the caller passes in.
//!
//! - **`calibration`** – estimates the physical density of the monitor and
//!   derives the tuning factor that keeps motion DPI-invariant.
//! - **`sampling`** – picks a center-biased landing point inside a target
//!   rectangle.
//! - **`trajectory`** – plans curved, eased waypoint sequences between two
//!   points.
//! - **`domain`** – points, rectangles and speed profiles.
//! - **`keymap`** – key names to Windows Virtual-Key codes.

pub mod calibration;
pub mod domain;
pub mod keymap;
pub mod sampling;
pub mod trajectory;

pub use calibration::{Calibration, DisplayCalibrator, TuningFactor, REFERENCE_PPI};
pub use domain::geometry::{Point, Rect};
pub use domain::speed::{Speed, SpeedError};
pub use keymap::{KeyStroke, VirtualKey};
pub use sampling::PointSampler;
pub use trajectory::{Path, TrajectoryPlanner};

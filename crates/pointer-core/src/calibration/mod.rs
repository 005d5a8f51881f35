//! Physical display calibration.
//!
//! Every distance, offset and timing heuristic in the trajectory planner is
//! written in *reference pixels*: pixels on a 24" 1920×1080 monitor.  The
//! [`TuningFactor`] converts between reference pixels and the pixels of the
//! monitor actually in use, so a move feels the same length in physical space
//! on a dense 4K panel as on a laptop screen.
//!
//! The physical size of a monitor is not observable, so it is estimated from
//! its resolution using a table of common panel sizes.  Unknown resolutions
//! fall back to a 24" assumption; that is logged but never fatal.

use tracing::{debug, warn};

use crate::domain::geometry::Rect;

/// Pixel density of the reference monitor (24", 1920×1080), in pixels per inch.
pub const REFERENCE_PPI: f64 = 91.78;

/// Diagonal assumed when the resolution is not in the table.
pub const DEFAULT_DIAGONAL_INCHES: f64 = 24.0;

/// Common resolutions and the panel diagonal (inches) they usually ship on.
const COMMON_MONITOR_SIZES: &[(u32, u32, f64)] = &[
    (1920, 1080, 24.0),
    (2560, 1440, 27.0),
    (3440, 1440, 34.0),
    (3840, 2160, 28.0),
    (2560, 1080, 29.0),
    (1366, 768, 15.6),
];

/// Looks up the typical diagonal for a resolution.
pub fn known_diagonal(width: u32, height: u32) -> Option<f64> {
    COMMON_MONITOR_SIZES
        .iter()
        .find(|(w, h, _)| *w == width && *h == height)
        .map(|(_, _, inches)| *inches)
}

/// A strictly positive, finite scale factor between monitor pixels and
/// reference pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningFactor(f64);

impl TuningFactor {
    /// The factor of the reference monitor itself.
    pub const REFERENCE: TuningFactor = TuningFactor(1.0);

    /// Wraps `value` if it is finite and greater than zero.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for TuningFactor {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The result of calibrating against one monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Monitor width in pixels used for the estimate.
    pub width: u32,
    /// Monitor height in pixels used for the estimate.
    pub height: u32,
    /// Estimated (or configured) diagonal in inches.
    pub diagonal_inches: f64,
    /// Estimated pixels per inch.
    pub ppi: f64,
    /// `ppi / REFERENCE_PPI`.
    pub tuning: TuningFactor,
    /// `true` when the resolution was unknown and the 24" default was used.
    pub assumed_default: bool,
}

impl Calibration {
    /// The calibration of the reference monitor.
    pub fn reference() -> Self {
        DisplayCalibrator::new().calibrate_resolution(1920, 1080)
    }

    /// The resolution string used for table lookups, e.g. `"1920x1080"`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Estimates monitor density and derives the [`TuningFactor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayCalibrator {
    diagonal_override: Option<f64>,
}

impl DisplayCalibrator {
    /// A calibrator that estimates the diagonal from the resolution table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A calibrator that trusts a user-supplied diagonal instead of the table.
    ///
    /// Non-positive or non-finite overrides are ignored.
    pub fn with_diagonal(inches: f64) -> Self {
        if inches.is_finite() && inches > 0.0 {
            Self {
                diagonal_override: Some(inches),
            }
        } else {
            warn!(inches, "ignoring invalid monitor diagonal override");
            Self::default()
        }
    }

    /// Calibrates against the monitor that contains the target window.
    pub fn calibrate(&self, monitor: &Rect) -> Calibration {
        self.calibrate_resolution(monitor.width, monitor.height)
    }

    /// Calibrates against an explicit resolution.
    ///
    /// A zero-area resolution is treated as the reference monitor so the
    /// resulting factor stays positive.
    pub fn calibrate_resolution(&self, width: u32, height: u32) -> Calibration {
        let (width, height) = if width == 0 || height == 0 {
            warn!(width, height, "monitor reports zero area; using reference resolution");
            (1920, 1080)
        } else {
            (width, height)
        };

        let (diagonal_inches, assumed_default) = match self.diagonal_override {
            Some(inches) => (inches, false),
            None => match known_diagonal(width, height) {
                Some(inches) => (inches, false),
                None => {
                    warn!(
                        resolution = %format!("{width}x{height}"),
                        "unknown resolution, assuming {DEFAULT_DIAGONAL_INCHES}\" monitor"
                    );
                    (DEFAULT_DIAGONAL_INCHES, true)
                }
            },
        };

        let pixel_diagonal = f64::from(width).hypot(f64::from(height));
        let ppi = pixel_diagonal / diagonal_inches;
        let tuning = TuningFactor::new(ppi / REFERENCE_PPI).unwrap_or(TuningFactor::REFERENCE);

        debug!(width, height, diagonal_inches, ppi, tuning = tuning.get(), "display calibrated");

        Calibration {
            width,
            height,
            diagonal_inches,
            ppi,
            tuning,
            assumed_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_monitor_normalizes_to_one() {
        // Arrange
        let calibrator = DisplayCalibrator::new();

        // Act
        let cal = calibrator.calibrate_resolution(1920, 1080);

        // Assert
        assert_eq!(cal.diagonal_inches, 24.0);
        assert!((cal.ppi - 91.79).abs() < 0.01, "ppi was {}", cal.ppi);
        assert!((cal.tuning.get() - 1.0).abs() < 0.001);
        assert!(!cal.assumed_default);
    }

    #[test]
    fn test_every_table_resolution_has_positive_factor() {
        let calibrator = DisplayCalibrator::new();
        for (w, h, inches) in COMMON_MONITOR_SIZES {
            let cal = calibrator.calibrate_resolution(*w, *h);
            assert!(cal.tuning.get() > 0.0);
            assert_eq!(cal.diagonal_inches, *inches);
            assert!(!cal.assumed_default);
        }
    }

    #[test]
    fn test_unknown_resolution_falls_back_to_24_inches() {
        let cal = DisplayCalibrator::new().calibrate_resolution(1600, 900);
        assert!(cal.assumed_default);
        assert_eq!(cal.diagonal_inches, DEFAULT_DIAGONAL_INCHES);
        assert!(cal.tuning.get() > 0.0);
    }

    #[test]
    fn test_dense_4k_panel_has_larger_factor_than_reference() {
        let cal = DisplayCalibrator::new().calibrate_resolution(3840, 2160);
        assert!(cal.tuning.get() > 1.7);
    }

    #[test]
    fn test_laptop_panel_is_denser_than_reference() {
        let cal = DisplayCalibrator::new().calibrate_resolution(1366, 768);
        assert!(cal.tuning.get() > 1.0);
    }

    #[test]
    fn test_diagonal_override_replaces_table() {
        let cal = DisplayCalibrator::with_diagonal(48.0).calibrate_resolution(1920, 1080);
        assert_eq!(cal.diagonal_inches, 48.0);
        assert!((cal.tuning.get() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let cal = DisplayCalibrator::with_diagonal(-3.0).calibrate_resolution(2560, 1440);
        assert_eq!(cal.diagonal_inches, 27.0);
    }

    #[test]
    fn test_zero_area_monitor_uses_reference() {
        let cal = DisplayCalibrator::new().calibrate(&Rect::new(0, 0, 0, 0));
        assert_eq!(cal.resolution(), "1920x1080");
        assert!(cal.tuning.get() > 0.0);
    }

    #[test]
    fn test_tuning_factor_rejects_non_positive_values() {
        assert!(TuningFactor::new(0.0).is_none());
        assert!(TuningFactor::new(-1.0).is_none());
        assert!(TuningFactor::new(f64::NAN).is_none());
        assert!(TuningFactor::new(f64::INFINITY).is_none());
        assert_eq!(TuningFactor::new(1.5).map(TuningFactor::get), Some(1.5));
    }
}

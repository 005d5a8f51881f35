//! PointerController: the virtual pointer a script drives.
//!
//! The controller owns the simulated pointer position.  The OS cursor is
//! never touched; every move is delivered through the [`InputInjector`] as a
//! sequence of planned waypoints, paced and cancellable.
//!
//! # Coordinate spaces
//!
//! - The virtual position and every move target are in **screen**
//!   coordinates, the same space as the window bounds the planner clamps to.
//! - Before injection a point is translated to **client** coordinates by the
//!   [`ScreenProvider`] and then shifted by the window-chrome offset
//!   (see [`DisplayContext::offset`]).

use std::sync::Arc;
use std::time::Duration;

use pointer_core::calibration::{Calibration, DisplayCalibrator, TuningFactor};
use pointer_core::trajectory::random_sign;
use pointer_core::{Point, Speed, TrajectoryPlanner};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, trace};

use crate::application::cancel::{sleep_cancellable, sleep_random, CancelSignal, Outcome};
use crate::application::inject_input::{ButtonEvent, InjectionError, InputInjector};
use crate::application::overlay::OverlayHandle;
use crate::application::screen::{DisplayContext, ScreenError, ScreenProvider};

/// Speed of the corrective move after a pause or overshoot.
pub const CORRECTION_SPEED: Speed = Speed::Medium;

/// Perpendicular displacement of pause and overshoot points, in pixels.
const DETOUR_OFFSET_PX: (f64, f64) = (50.0, 70.0);

/// Fraction of the way to the target where a paused move stops.
const PAUSE_FRACTION: (f64, f64) = (0.85, 0.95);

/// Fraction of the way to the target an overshooting move reaches.
const OVERSHOOT_FRACTION: (f64, f64) = (1.04, 1.10);

/// Error type for pointer and keyboard operations.
#[derive(Debug, Error)]
pub enum PointerError {
    #[error("injection failed: {0}")]
    Injection(#[from] InjectionError),
    #[error("screen query failed: {0}")]
    Screen(#[from] ScreenError),
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
}

/// Tunables for a [`PointerController`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSettings {
    /// Pause after each delivered waypoint.
    pub waypoint_delay: Duration,
    /// Bounds in milliseconds of the hesitation inside `move_to_pause`.
    pub pause_ms: (u64, u64),
    /// Chance that a click is followed by a one-pixel nudge.
    pub jitter_probability: f64,
    /// Overrides the estimated monitor diagonal.
    pub diagonal_inches: Option<f64>,
    /// Seeds the controller RNG for reproducible runs.
    pub seed: Option<u64>,
    /// Initial virtual position; random inside the window when unset.
    pub start: Option<Point>,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            waypoint_delay: Duration::from_millis(1),
            pause_ms: (10, 20),
            jitter_probability: 0.5,
            diagonal_inches: None,
            seed: None,
            start: None,
        }
    }
}

/// Drives the virtual pointer for one Running period.
pub struct PointerController {
    injector: Arc<dyn InputInjector>,
    screen: Arc<dyn ScreenProvider>,
    planner: TrajectoryPlanner,
    calibration: Calibration,
    offset: (i32, i32),
    position: Point,
    overlay: OverlayHandle,
    cancel: CancelSignal,
    settings: PointerSettings,
    rng: StdRng,
    paths_planned: usize,
}

impl PointerController {
    /// Calibrates against the monitor, binds the planner to the window and
    /// places the virtual pointer.
    pub fn new(
        injector: Arc<dyn InputInjector>,
        screen: Arc<dyn ScreenProvider>,
        display: DisplayContext,
        overlay: OverlayHandle,
        cancel: CancelSignal,
        mut settings: PointerSettings,
    ) -> Self {
        let calibrator = settings
            .diagonal_inches
            .map_or_else(DisplayCalibrator::new, DisplayCalibrator::with_diagonal);
        let calibration = calibrator.calibrate(&display.monitor);
        let planner = TrajectoryPlanner::new(display.window, calibration.tuning);

        let mut rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        if !settings.jitter_probability.is_finite() {
            settings.jitter_probability = PointerSettings::default().jitter_probability;
        }
        settings.jitter_probability = settings.jitter_probability.clamp(0.0, 1.0);

        let window = display.window;
        let fullscreen = display.fullscreen;
        let position = settings.start.unwrap_or_else(|| {
            if window.is_empty() {
                window.center()
            } else {
                Point::new(
                    window.x + rng.random_range(0..window.width) as i32,
                    window.y + rng.random_range(0..window.height) as i32,
                )
            }
        });

        debug!(
            resolution = %calibration.resolution(),
            tuning = calibration.tuning.get(),
            fullscreen,
            x = position.x,
            y = position.y,
            "pointer controller ready"
        );
        overlay.publish(position);

        Self {
            injector,
            screen,
            planner,
            calibration,
            offset: display.offset(),
            position,
            overlay,
            cancel,
            settings,
            rng,
            paths_planned: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Current virtual position in screen coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn tuning_factor(&self) -> TuningFactor {
        self.calibration.tuning
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Number of paths planned so far.
    pub fn paths_planned(&self) -> usize {
        self.paths_planned
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    /// Moves along a planned path to `target`.
    ///
    /// If cancelled, the virtual position stays at the last waypoint that was
    /// actually delivered.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::Injection`] if the injector rejects a move.
    pub fn move_to(&mut self, target: Point, speed: Speed) -> Result<Outcome, PointerError> {
        if self.check_cancelled("move") {
            return Ok(Outcome::Cancelled);
        }
        if target == self.position {
            return Ok(Outcome::Completed);
        }

        let path = self.planner.plan(&mut self.rng, self.position, target, speed);
        self.paths_planned += 1;
        trace!(waypoints = path.len(), ?speed, "planned move");

        for &waypoint in &path {
            if self.check_cancelled("move") {
                return Ok(Outcome::Cancelled);
            }
            self.deliver(waypoint)?;
            if !self.settings.waypoint_delay.is_zero()
                && sleep_cancellable(self.settings.waypoint_delay, &self.cancel).is_cancelled()
            {
                debug!(x = self.position.x, y = self.position.y, "move cancelled");
                return Ok(Outcome::Cancelled);
            }
        }
        Ok(Outcome::Completed)
    }

    /// Moves most of the way, hesitates, then finishes at medium speed.
    pub fn move_to_pause(&mut self, target: Point, speed: Speed) -> Result<Outcome, PointerError> {
        self.detour(target, speed, PAUSE_FRACTION, true)
    }

    /// Moves slightly past the target, then corrects back at medium speed.
    pub fn move_to_and_overshoot(
        &mut self,
        target: Point,
        speed: Speed,
    ) -> Result<Outcome, PointerError> {
        self.detour(target, speed, OVERSHOOT_FRACTION, false)
    }

    fn detour(
        &mut self,
        target: Point,
        speed: Speed,
        (lo, hi): (f64, f64),
        hesitate: bool,
    ) -> Result<Outcome, PointerError> {
        if target == self.position {
            return Ok(Outcome::Completed);
        }

        let magnitude = self.rng.random_range(DETOUR_OFFSET_PX.0..DETOUR_OFFSET_PX.1);
        let direction = random_sign(&mut self.rng);
        let via = self.planner.point_along_path(
            &mut self.rng,
            self.position,
            target,
            lo,
            hi,
            magnitude,
            direction,
        );

        if self.move_to(via, speed)?.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        if hesitate {
            let (min_ms, max_ms) = self.settings.pause_ms;
            if sleep_random(&mut self.rng, min_ms, max_ms, &self.cancel).is_cancelled() {
                return Ok(Outcome::Cancelled);
            }
        }
        self.move_to(target, CORRECTION_SPEED)
    }

    // ── Buttons ───────────────────────────────────────────────────────────────

    /// Left click at the current position, followed by a possible nudge.
    pub fn left_click(&mut self) -> Result<Outcome, PointerError> {
        if self.check_cancelled("left click") {
            return Ok(Outcome::Cancelled);
        }
        let (x, y) = self.injector_coords(self.position);
        self.injector.click_left(x, y)?;
        self.micro_jitter()?;
        Ok(Outcome::Completed)
    }

    /// Right click at the current position, followed by a possible nudge.
    pub fn right_click(&mut self) -> Result<Outcome, PointerError> {
        if self.check_cancelled("right click") {
            return Ok(Outcome::Cancelled);
        }
        let (x, y) = self.injector_coords(self.position);
        self.injector.click_right(x, y)?;
        self.micro_jitter()?;
        Ok(Outcome::Completed)
    }

    /// A single middle-button transition at the current position.
    pub fn middle_click(&mut self, event: ButtonEvent) -> Result<Outcome, PointerError> {
        if self.check_cancelled("middle click") {
            return Ok(Outcome::Cancelled);
        }
        let (x, y) = self.injector_coords(self.position);
        self.injector.middle_input(x, y, event)?;
        Ok(Outcome::Completed)
    }

    /// Occasionally nudges the pointer by a pixel or so, the way a hand
    /// drifts after pressing a button.
    pub fn micro_jitter(&mut self) -> Result<(), PointerError> {
        if !self.rng.random_bool(self.settings.jitter_probability) {
            return Ok(());
        }
        let dx = self.rng.random_range(-1..=1);
        let dy = self.rng.random_range(-1..=3);
        self.deliver(self.position.translate(dx, dy))?;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn injector_coords(&self, p: Point) -> (i32, i32) {
        let client = self.screen.to_client(p);
        (client.x + self.offset.0, client.y + self.offset.1)
    }

    /// Injects one move and records it as the new virtual position.
    fn deliver(&mut self, p: Point) -> Result<(), PointerError> {
        let (x, y) = self.injector_coords(p);
        self.injector.move_mouse(x, y)?;
        self.position = p;
        self.overlay.publish(p);
        Ok(())
    }

    fn check_cancelled(&self, what: &str) -> bool {
        let cancelled = self.cancel.is_cancelled();
        if cancelled {
            debug!(operation = what, "cancelled");
        }
        cancelled
    }
}

//! Screen provider adapters.
//!
//! [`MockScreenProvider`] describes a fixed window on a fixed monitor.
//! Fixtures cover the common cases: a decorated 765×503 client on a 1080p
//! monitor and a fullscreen client on a 1440p monitor.

use std::sync::atomic::{AtomicUsize, Ordering};

use pointer_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::application::screen::{ScreenError, ScreenProvider};

/// A static description of the target window.
#[derive(Debug, Default)]
pub struct MockScreenProvider {
    pub window: Rect,
    pub monitor: Rect,
    pub fullscreen: bool,
    pub pid: u32,
    /// When `true`, every fallible query returns `ScreenError::Platform`.
    pub should_fail: bool,
    focus_calls: AtomicUsize,
}

impl MockScreenProvider {
    pub fn new(window: Rect, monitor: Rect, fullscreen: bool) -> Self {
        Self {
            window,
            monitor,
            fullscreen,
            pid: 4242,
            ..Self::default()
        }
    }

    /// A 765×503 decorated client at (100, 80) on a 1920×1080 monitor.
    pub fn windowed_1080p() -> Self {
        Self::new(
            Rect::new(100, 80, 765, 503),
            Rect::new(0, 0, 1920, 1080),
            false,
        )
    }

    /// A fullscreen client on a 2560×1440 monitor.
    pub fn fullscreen_1440p() -> Self {
        let monitor = Rect::new(0, 0, 2560, 1440);
        Self::new(monitor, monitor, true)
    }

    /// Builds a provider from the `[screen]` config section.
    pub fn from_config(cfg: &ScreenConfig) -> Self {
        Self::new(
            Rect::new(cfg.window_x, cfg.window_y, cfg.window_width, cfg.window_height),
            Rect::new(0, 0, cfg.monitor_width, cfg.monitor_height),
            cfg.fullscreen,
        )
    }

    pub fn focus_count(&self) -> usize {
        self.focus_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ScreenError> {
        if self.should_fail {
            Err(ScreenError::Platform("mock failure".into()))
        } else {
            Ok(())
        }
    }
}

impl ScreenProvider for MockScreenProvider {
    fn window_bounds(&self) -> Result<Rect, ScreenError> {
        self.check()?;
        Ok(self.window)
    }

    fn monitor_bounds(&self) -> Result<Rect, ScreenError> {
        self.check()?;
        Ok(self.monitor)
    }

    fn is_fullscreen(&self) -> Result<bool, ScreenError> {
        self.check()?;
        Ok(self.fullscreen)
    }

    fn to_client(&self, p: Point) -> Point {
        p.translate(-self.window.x, -self.window.y)
    }

    fn to_screen(&self, p: Point) -> Point {
        p.translate(self.window.x, self.window.y)
    }

    fn target_pid(&self) -> Result<u32, ScreenError> {
        self.check()?;
        Ok(self.pid)
    }

    fn focus_window(&self) -> Result<(), ScreenError> {
        self.check()?;
        self.focus_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Simulated screen geometry for the demo binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenConfig {
    #[serde(default = "default_window_x")]
    pub window_x: i32,
    #[serde(default = "default_window_y")]
    pub window_y: i32,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_monitor_width")]
    pub monitor_width: u32,
    #[serde(default = "default_monitor_height")]
    pub monitor_height: u32,
    #[serde(default)]
    pub fullscreen: bool,
}

fn default_window_x() -> i32 {
    100
}
fn default_window_y() -> i32 {
    80
}
fn default_window_width() -> u32 {
    765
}
fn default_window_height() -> u32 {
    503
}
fn default_monitor_width() -> u32 {
    1920
}
fn default_monitor_height() -> u32 {
    1080
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            window_x: default_window_x(),
            window_y: default_window_y(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            monitor_width: default_monitor_width(),
            monitor_height: default_monitor_height(),
            fullscreen: false,
        }
    }
}

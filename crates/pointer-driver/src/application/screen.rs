//! Screen provider port: where the target window is and how to talk to it.

use pointer_core::{Point, Rect};
use thiserror::Error;

/// Chrome offset added to client coordinates for a fullscreen window.
pub const FULLSCREEN_OFFSET: (i32, i32) = (0, -21);

/// Chrome offset added to client coordinates for a decorated window.
pub const WINDOWED_OFFSET: (i32, i32) = (-4, -27);

/// Error type for screen queries.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("target window not found")]
    WindowNotFound,
}

/// Read access to the target window and the monitor it sits on.
pub trait ScreenProvider: Send + Sync {
    /// Bounds of the target window in screen coordinates.
    fn window_bounds(&self) -> Result<Rect, ScreenError>;

    /// Bounds of the monitor that contains the target window.
    fn monitor_bounds(&self) -> Result<Rect, ScreenError>;

    fn is_fullscreen(&self) -> Result<bool, ScreenError>;

    /// Screen coordinates to window-client coordinates.
    fn to_client(&self, p: Point) -> Point;

    /// Window-client coordinates to screen coordinates.
    fn to_screen(&self, p: Point) -> Point;

    /// Process id of the target application.
    fn target_pid(&self) -> Result<u32, ScreenError>;

    /// Brings the target window to the foreground.
    fn focus_window(&self) -> Result<(), ScreenError>;
}

/// Snapshot of the screen state taken once per Running period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    pub window: Rect,
    pub monitor: Rect,
    pub fullscreen: bool,
}

impl DisplayContext {
    /// Reads window bounds, monitor bounds and the fullscreen flag.
    pub fn probe(screen: &dyn ScreenProvider) -> Result<Self, ScreenError> {
        Ok(Self {
            window: screen.window_bounds()?,
            monitor: screen.monitor_bounds()?,
            fullscreen: screen.is_fullscreen()?,
        })
    }

    /// The client-to-injector offset for this window mode.
    pub fn offset(&self) -> (i32, i32) {
        if self.fullscreen {
            FULLSCREEN_OFFSET
        } else {
            WINDOWED_OFFSET
        }
    }
}

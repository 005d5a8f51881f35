//! Native input injector port.
//!
//! The injector delivers synthetic mouse and keyboard events straight to the
//! target process, bypassing the OS cursor.  The controller never talks to an
//! OS API directly; it goes through [`InputInjector`], which is implemented in
//! the infrastructure layer (and by a recording mock for tests).

use std::sync::Arc;

use pointer_core::VirtualKey;
use thiserror::Error;

/// Error type for injector operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("no target process with id {0}")]
    ProcessNotFound(u32),
    #[error("injector already released")]
    Released,
}

/// Mouse button transition, carrying the injector's event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
    Release,
}

impl ButtonEvent {
    /// Event code understood by the injector (501 press, 502 release).
    pub fn code(self) -> i32 {
        match self {
            ButtonEvent::Press => 501,
            ButtonEvent::Release => 502,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            501 => Some(ButtonEvent::Press),
            502 => Some(ButtonEvent::Release),
            _ => None,
        }
    }
}

/// Keyboard key transition, carrying the injector's event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press,
    Release,
}

impl KeyEvent {
    /// Event code understood by the injector (401 press, 402 release).
    pub fn code(self) -> i32 {
        match self {
            KeyEvent::Press => 401,
            KeyEvent::Release => 402,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            401 => Some(KeyEvent::Press),
            402 => Some(KeyEvent::Release),
            _ => None,
        }
    }
}

/// Low-level input injection bound to one target process.
///
/// Coordinates are in the injector's own space: client-local, with the
/// window-chrome offset already applied by the caller.
pub trait InputInjector: Send + Sync {
    /// Moves the injected pointer to an absolute position.
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), InjectionError>;

    /// Emits a full left click (press + release) at a position.
    fn click_left(&self, x: i32, y: i32) -> Result<(), InjectionError>;

    /// Emits a full right click (press + release) at a position.
    fn click_right(&self, x: i32, y: i32) -> Result<(), InjectionError>;

    /// Emits a single middle-button transition at a position.
    fn middle_input(&self, x: i32, y: i32, event: ButtonEvent) -> Result<(), InjectionError>;

    /// Emits a single key transition.
    fn key_input(&self, event: KeyEvent, key: VirtualKey) -> Result<(), InjectionError>;

    /// Releases the native handle.  Every later call fails.
    fn destroy(&self) -> Result<(), InjectionError>;
}

/// Attaches injectors to target processes.
#[cfg_attr(test, mockall::automock)]
pub trait InjectorFactory: Send + Sync {
    /// Attaches to the process with id `pid`.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the process cannot be found or the
    /// injector cannot be loaded into it.
    fn attach(&self, pid: u32) -> Result<Arc<dyn InputInjector>, InjectionError>;
}

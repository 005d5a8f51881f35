//! pointer-driver library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The driver moves a *virtual* pointer inside one target window.  The OS
//! cursor never moves; instead every step of a planned, human-looking path
//! is injected straight into the target process:
//!
//! 1. `LifecycleGate::init` focuses the window, attaches an injector and
//!    calibrates motion to the monitor's pixel density.
//! 2. A script obtains the pointer, keyboard and zone map from the gate and
//!    drives them.  Every operation honors the shared cancel signal.
//! 3. `LifecycleGate::shutdown` releases the injector.

/// Application layer: capabilities, lifecycle and ports.
pub mod application;

/// Infrastructure layer: mock adapters, overlay task and config storage.
pub mod infrastructure;

pub use application::cancel::{CancelSignal, Outcome};
pub use application::lifecycle::{Collaborators, ControllerState, GateError, GateSettings, LifecycleGate};
pub use application::pointer::{PointerController, PointerError, PointerSettings};

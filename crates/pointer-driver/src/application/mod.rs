//! Application layer: the capabilities a script drives and the ports they
//! depend on.
//!
//! - **`lifecycle`** – `LifecycleGate`, the Stopped/Running state machine
//!   that owns the injector handle and hands out capabilities.
//! - **`pointer`** – `PointerController`, the virtual pointer: planned
//!   moves, pause and overshoot moves, clicks, micro-jitter.
//! - **`keyboard`** – `VirtualKeyboard`, key presses through the same
//!   injector.
//! - **`cancel`** – the cooperative stop flag and cancellable sleepers.
//! - **`inject_input`**, **`screen`**, **`zones`**, **`overlay`** – the
//!   collaborator ports (`InputInjector`, `ScreenProvider`, `ZoneSource`,
//!   `OverlaySurface`) implemented in `infrastructure`.

pub mod cancel;
pub mod inject_input;
pub mod keyboard;
pub mod lifecycle;
pub mod overlay;
pub mod pointer;
pub mod screen;
pub mod zones;

//! Infrastructure layer for the pointer driver.
//!
//! Contains the adapters behind the application ports: injectors, screen
//! providers, zone sources, the overlay rendering task, and config storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `pointer_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`input_injection`** – recording injector and injector factory.
//! - **`screen`** – static screen provider with windowed and fullscreen
//!   fixtures.
//! - **`zones`** – config-backed zone source with edge-anchored offsets for
//!   resizable layouts.
//! - **`overlay`** – tokio task that repaints an overlay surface from the
//!   latest published position.
//! - **`storage`** – TOML config loading, validation and saving.

pub mod input_injection;
pub mod overlay;
pub mod screen;
pub mod storage;
pub mod zones;

//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the TOML settings file and turns
//! it into the settings the lifecycle gate is built with.

pub mod config;

//! Input injector adapters.
//!
//! Native injectors load an agent into the target process and deliver events
//! through it, so they are only available on the platform that hosts the
//! target.  The recording injector in [`mock`] stands in everywhere else:
//! tests, CI and the demo binary.

pub mod mock;

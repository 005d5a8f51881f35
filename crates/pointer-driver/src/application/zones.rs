//! Named screen zones.
//!
//! Scripts aim at regions by name ("inventory", "minimap", ...) rather than
//! by raw coordinates.  A [`ZoneSource`] builds the name → rectangle map for
//! the active client layout once per Running period.

use std::collections::BTreeMap;

use pointer_core::{Point, PointSampler, Rect};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("unknown zone: {0}")]
    Unknown(String),
    #[error("zone map unavailable: {0}")]
    Unavailable(String),
}

/// Builds zone maps for a given layout and window.
pub trait ZoneSource: Send + Sync {
    /// `window` is the target window in screen coordinates; returned zones
    /// are in the same space.
    fn build(&self, fixed_layout: bool, window: Rect) -> Result<ZoneMap, ZoneError>;
}

/// Name → rectangle map for one client layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneMap {
    zones: BTreeMap<String, Rect>,
    fixed: bool,
}

impl ZoneMap {
    pub fn new(fixed: bool) -> Self {
        Self {
            zones: BTreeMap::new(),
            fixed,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, rect: Rect) {
        self.zones.insert(name.into(), rect);
    }

    pub fn get(&self, name: &str) -> Result<Rect, ZoneError> {
        self.zones
            .get(name)
            .copied()
            .ok_or_else(|| ZoneError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Whether this map describes the fixed-size client layout.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// A center-biased click point inside the named zone.
    pub fn sample_point<R: Rng>(
        &self,
        name: &str,
        sampler: &mut PointSampler<R>,
    ) -> Result<Point, ZoneError> {
        let rect = self.get(name)?;
        Ok(sampler.sample(&rect))
    }
}

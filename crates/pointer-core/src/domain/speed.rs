//! Movement speed profiles.
//!
//! Exactly four profiles exist.  Labels arrive as strings from scripts and
//! config files; anything other than the four known labels is a
//! configuration error, never silently defaulted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a speed label is not one of the known profiles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeedError {
    #[error("unknown speed profile {0:?}; expected slow, medium, fast or fastest")]
    Unknown(String),
}

/// A movement speed profile.
///
/// Slower profiles emit more waypoints per pixel, which at a fixed pacing
/// delay produces a slower on-screen motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Medium,
    Fast,
    Fastest,
}

impl Speed {
    /// All profiles, slowest first.
    pub const ALL: [Speed; 4] = [Speed::Slow, Speed::Medium, Speed::Fast, Speed::Fastest];

    /// Base waypoints emitted per reference pixel of travel.
    pub fn steps_per_pixel(self) -> f64 {
        match self {
            Speed::Slow => 0.30,
            Speed::Medium => 0.20,
            Speed::Fast => 0.12,
            Speed::Fastest => 0.05,
        }
    }

    /// The lowercase label used in scripts and config files.
    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Medium => "medium",
            Speed::Fast => "fast",
            Speed::Fastest => "fastest",
        }
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Speed::Slow),
            "medium" => Ok(Speed::Medium),
            "fast" => Ok(Speed::Fast),
            "fastest" => Ok(Speed::Fastest),
            other => Err(SpeedError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

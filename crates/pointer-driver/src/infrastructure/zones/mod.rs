//! Static, config-backed zone source.
//!
//! Zones are declared relative to the client window.  A negative `x` or `y`
//! anchors the zone to the right or bottom edge instead, which is how
//! resizable layouts keep their side panels in place:
//!
//! ```toml
//! [[zones]]
//! name = "inventory"
//! layout = "resizable"
//! x = -241          # 241 px left of the right edge
//! y = -336
//! width = 190
//! height = 261
//! ```

use pointer_core::Rect;
use serde::{Deserialize, Serialize};

use crate::application::zones::{ZoneError, ZoneMap, ZoneSource};

/// Which client layout a zone belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutFilter {
    Fixed,
    Resizable,
    #[default]
    Any,
}

impl LayoutFilter {
    fn matches(self, fixed_layout: bool) -> bool {
        match self {
            LayoutFilter::Any => true,
            LayoutFilter::Fixed => fixed_layout,
            LayoutFilter::Resizable => !fixed_layout,
        }
    }
}

/// One zone declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneConfig {
    pub name: String,
    #[serde(default)]
    pub layout: LayoutFilter,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ZoneConfig {
    pub fn new(name: &str, layout: LayoutFilter, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            layout,
            x,
            y,
            width,
            height,
        }
    }

    /// Screen-space rectangle of this zone inside `window`.
    fn resolve(&self, window: Rect) -> Rect {
        let x = if self.x < 0 {
            window.right().saturating_add(self.x)
        } else {
            window.x.saturating_add(self.x)
        };
        let y = if self.y < 0 {
            window.bottom().saturating_add(self.y)
        } else {
            window.y.saturating_add(self.y)
        };
        Rect::new(x, y, self.width, self.height)
    }
}

/// Builds zone maps from a fixed list of declarations.
#[derive(Debug, Clone, Default)]
pub struct StaticZoneSource {
    zones: Vec<ZoneConfig>,
}

impl StaticZoneSource {
    pub fn new(zones: Vec<ZoneConfig>) -> Self {
        Self { zones }
    }

    /// Built-in zones for a 765×503 fixed client and its resizable variant.
    pub fn classic() -> Self {
        use LayoutFilter::{Fixed, Resizable};
        Self::new(vec![
            ZoneConfig::new("game_view", Fixed, 4, 4, 512, 334),
            ZoneConfig::new("chat", Fixed, 7, 345, 506, 129),
            ZoneConfig::new("minimap", Fixed, 570, 9, 145, 151),
            ZoneConfig::new("inventory", Fixed, 548, 205, 190, 261),
            ZoneConfig::new("compass", Fixed, 545, 4, 3, 3),
            ZoneConfig::new("minimap", Resizable, -215, 4, 150, 155),
            ZoneConfig::new("inventory", Resizable, -241, -336, 190, 261),
            ZoneConfig::new("chat", Resizable, 7, -165, 506, 129),
        ])
    }

    /// Uses `zones` when non-empty, otherwise the built-in set.
    pub fn from_config(zones: &[ZoneConfig]) -> Self {
        if zones.is_empty() {
            Self::classic()
        } else {
            Self::new(zones.to_vec())
        }
    }
}

impl ZoneSource for StaticZoneSource {
    fn build(&self, fixed_layout: bool, window: Rect) -> Result<ZoneMap, ZoneError> {
        if window.is_empty() {
            return Err(ZoneError::Unavailable(format!(
                "target window has no area ({}x{})",
                window.width, window.height
            )));
        }
        let mut map = ZoneMap::new(fixed_layout);
        for zone in self.zones.iter().filter(|z| z.layout.matches(fixed_layout)) {
            map.insert(zone.name.clone(), zone.resolve(window));
        }
        Ok(map)
    }
}

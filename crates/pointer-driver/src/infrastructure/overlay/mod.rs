//! Overlay rendering task.
//!
//! The renderer owns an [`OverlaySurface`] and repaints it whenever the
//! controller publishes a new position.  It runs as its own tokio task and
//! exits once every [`OverlayHandle`] has been dropped, clearing the surface
//! on the way out.

use std::sync::{Arc, Mutex, PoisonError};

use pointer_core::Point;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::application::overlay::{OverlayHandle, OverlaySurface};

pub struct OverlayRenderer;

impl OverlayRenderer {
    /// Spawns the rendering task on the current runtime.
    pub fn spawn<S>(mut surface: S) -> (OverlayHandle, JoinHandle<()>)
    where
        S: OverlaySurface + 'static,
    {
        let (tx, mut rx) = watch::channel::<Option<Point>>(None);
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let latest = *rx.borrow_and_update();
                match latest {
                    Some(p) => surface.draw_marker(p),
                    None => surface.clear(),
                }
            }
            surface.clear();
            debug!("overlay renderer stopped");
        });
        (OverlayHandle::new(tx), task)
    }
}

/// What a [`RecordingSurface`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Marker(Point),
    Cleared,
}

/// Keeps every draw call, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<OverlayEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OverlayEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: OverlayEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl OverlaySurface for RecordingSurface {
    fn draw_marker(&mut self, p: Point) {
        self.record(OverlayEvent::Marker(p));
    }

    fn clear(&mut self) {
        self.record(OverlayEvent::Cleared);
    }
}

/// Logs the marker position instead of drawing it.
#[derive(Debug, Default)]
pub struct TracingSurface {
    last: Option<Point>,
}

impl OverlaySurface for TracingSurface {
    fn draw_marker(&mut self, p: Point) {
        if self.last != Some(p) {
            trace!(x = p.x, y = p.y, "overlay marker");
            self.last = Some(p);
        }
    }

    fn clear(&mut self) {
        if self.last.take().is_some() {
            trace!("overlay cleared");
        }
    }
}

//! Overlay port.
//!
//! The controller publishes its virtual position after every injected move.
//! Publishing goes through a latest-value channel, so it never blocks and a
//! slow renderer only ever sees the newest position.

use std::sync::Arc;

use pointer_core::Point;
use tokio::sync::watch;

/// Something that can draw the pointer marker.
pub trait OverlaySurface: Send {
    fn draw_marker(&mut self, p: Point);

    fn clear(&mut self);
}

/// Sending half of the overlay channel.  `None` on the channel means "clear".
#[derive(Debug, Clone, Default)]
pub struct OverlayHandle {
    tx: Option<Arc<watch::Sender<Option<Point>>>>,
}

impl OverlayHandle {
    pub(crate) fn new(tx: watch::Sender<Option<Point>>) -> Self {
        Self { tx: Some(Arc::new(tx)) }
    }

    /// A handle with no renderer behind it; every publish is dropped.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn publish(&self, p: Point) {
        if let Some(tx) = &self.tx {
            tx.send_replace(Some(p));
        }
    }

    pub fn clear(&self) {
        if let Some(tx) = &self.tx {
            tx.send_replace(None);
        }
    }

    /// The most recently published value, if a renderer is attached.
    pub fn latest(&self) -> Option<Point> {
        self.tx.as_ref().and_then(|tx| *tx.borrow())
    }
}

//! Cooperative cancellation and cancellable pauses.
//!
//! A running script is stopped by raising a shared [`CancelSignal`].  Nothing
//! is interrupted forcibly: pointer operations poll the signal before every
//! waypoint and click, and the sleepers below wake in short slices to look at
//! it.  Observing the signal is not an error; it surfaces as
//! [`Outcome::Cancelled`].

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use rand::Rng;

/// Granularity at which sleepers re-check the signal.
const SLICE: Duration = Duration::from_millis(5);

/// Shared, clonable stop flag.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal(Arc<AtomicBool>);

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.  Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lowers the flag so the next run starts clean.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// How a cancellable operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

impl Outcome {
    pub fn is_cancelled(self) -> bool {
        self == Outcome::Cancelled
    }
}

/// Sleeps for `duration`, returning early with [`Outcome::Cancelled`] once the
/// signal is raised.
pub fn sleep_cancellable(duration: Duration, signal: &CancelSignal) -> Outcome {
    let deadline = Instant::now() + duration;
    loop {
        if signal.is_cancelled() {
            return Outcome::Cancelled;
        }
        let now = Instant::now();
        if now >= deadline {
            return Outcome::Completed;
        }
        std::thread::sleep(SLICE.min(deadline - now));
    }
}

/// Sleeps for a uniformly random number of milliseconds in `[min_ms, max_ms)`.
///
/// Reversed bounds are swapped; equal bounds sleep exactly that long.
pub fn sleep_random<R: Rng + ?Sized>(
    rng: &mut R,
    min_ms: u64,
    max_ms: u64,
    signal: &CancelSignal,
) -> Outcome {
    let (lo, hi) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    let ms = if lo == hi { lo } else { rng.random_range(lo..hi) };
    sleep_cancellable(Duration::from_millis(ms), signal)
}

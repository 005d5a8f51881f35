//! Recording injector and factory.
//!
//! Native injection needs a live target process and a loaded agent inside
//! it.  The recording injector replaces every native call with an in-memory
//! record so tests and the demo binary can see exactly what would have been
//! sent, and in what order.
//!
//! ```ignore
//! let injector = Arc::new(MockInputInjector::new());
//! injector.move_mouse(10, 20).unwrap();
//! assert_eq!(*injector.mouse_moves.lock().unwrap(), vec![(10, 20)]);
//! ```

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
};

use pointer_core::VirtualKey;

use crate::application::cancel::CancelSignal;
use crate::application::inject_input::{
    ButtonEvent, InjectionError, InjectorFactory, InputInjector, KeyEvent,
};

/// Records every injected event.
#[derive(Debug, Default)]
pub struct MockInputInjector {
    pub mouse_moves: Mutex<Vec<(i32, i32)>>,
    pub left_clicks: Mutex<Vec<(i32, i32)>>,
    pub right_clicks: Mutex<Vec<(i32, i32)>>,
    pub middle_inputs: Mutex<Vec<(i32, i32, ButtonEvent)>>,
    pub key_inputs: Mutex<Vec<(KeyEvent, VirtualKey)>>,
    /// When `true`, every event method returns `InjectionError::Platform`.
    pub should_fail: bool,
    /// Raises the signal once this many moves have been recorded.
    pub cancel_after_moves: Option<(usize, CancelSignal)>,
    destroyed: AtomicBool,
    destroy_calls: AtomicUsize,
}

fn push<T>(log: &Mutex<Vec<T>>, item: T) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(item);
}

fn count<T>(log: &Mutex<Vec<T>>) -> usize {
    log.lock().unwrap_or_else(PoisonError::into_inner).len()
}

impl MockInputInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// An injector whose every event fails with `InjectionError::Platform`.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// An injector that raises `signal` after recording `moves` moves.
    pub fn cancelling_after(moves: usize, signal: CancelSignal) -> Self {
        Self {
            cancel_after_moves: Some((moves, signal)),
            ..Self::default()
        }
    }

    /// Number of event calls recorded, excluding `destroy`.
    pub fn total_calls(&self) -> usize {
        count(&self.mouse_moves)
            + count(&self.left_clicks)
            + count(&self.right_clicks)
            + count(&self.middle_inputs)
            + count(&self.key_inputs)
    }

    pub fn destroy_count(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        if self.is_destroyed() {
            return Err(InjectionError::Released);
        }
        Ok(())
    }
}

impl InputInjector for MockInputInjector {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), InjectionError> {
        self.check()?;
        push(&self.mouse_moves, (x, y));
        if let Some((limit, signal)) = &self.cancel_after_moves {
            if count(&self.mouse_moves) >= *limit {
                signal.cancel();
            }
        }
        Ok(())
    }

    fn click_left(&self, x: i32, y: i32) -> Result<(), InjectionError> {
        self.check()?;
        push(&self.left_clicks, (x, y));
        Ok(())
    }

    fn click_right(&self, x: i32, y: i32) -> Result<(), InjectionError> {
        self.check()?;
        push(&self.right_clicks, (x, y));
        Ok(())
    }

    fn middle_input(&self, x: i32, y: i32, event: ButtonEvent) -> Result<(), InjectionError> {
        self.check()?;
        push(&self.middle_inputs, (x, y, event));
        Ok(())
    }

    fn key_input(&self, event: KeyEvent, key: VirtualKey) -> Result<(), InjectionError> {
        self.check()?;
        push(&self.key_inputs, (event, key));
        Ok(())
    }

    fn destroy(&self) -> Result<(), InjectionError> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Err(InjectionError::Released);
        }
        Ok(())
    }
}

/// Hands out a fresh [`MockInputInjector`] per attach and keeps them all.
#[derive(Debug, Default)]
pub struct RecordingInjectorFactory {
    pub attached_pids: Mutex<Vec<u32>>,
    pub created: Mutex<Vec<Arc<MockInputInjector>>>,
    pub should_fail: bool,
}

impl RecordingInjectorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently attached injector.
    pub fn last(&self) -> Option<Arc<MockInputInjector>> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl InjectorFactory for RecordingInjectorFactory {
    fn attach(&self, pid: u32) -> Result<Arc<dyn InputInjector>, InjectionError> {
        push(&self.attached_pids, pid);
        if self.should_fail {
            return Err(InjectionError::ProcessNotFound(pid));
        }
        let injector = Arc::new(MockInputInjector::new());
        push(&self.created, Arc::clone(&injector));
        Ok(injector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        // Arrange
        let injector = MockInputInjector::new();

        // Act
        injector.move_mouse(1, 2).unwrap();
        injector.move_mouse(3, 4).unwrap();
        injector.click_left(3, 4).unwrap();

        // Assert
        assert_eq!(*injector.mouse_moves.lock().unwrap(), vec![(1, 2), (3, 4)]);
        assert_eq!(injector.total_calls(), 3);
    }

    #[test]
    fn test_should_fail_rejects_every_event() {
        let injector = MockInputInjector::failing();
        assert!(injector.move_mouse(0, 0).is_err());
        assert!(injector.key_input(KeyEvent::Press, VirtualKey::ESCAPE).is_err());
        assert_eq!(injector.total_calls(), 0);
    }

    #[test]
    fn test_calls_after_destroy_fail() {
        let injector = MockInputInjector::new();
        injector.destroy().unwrap();

        assert!(matches!(injector.click_right(0, 0), Err(InjectionError::Released)));
        assert!(injector.destroy().is_err());
        assert_eq!(injector.destroy_count(), 2);
    }

    #[test]
    fn test_cancelling_after_raises_signal_at_limit() {
        let signal = CancelSignal::new();
        let injector = MockInputInjector::cancelling_after(2, signal.clone());

        injector.move_mouse(0, 0).unwrap();
        assert!(!signal.is_cancelled());
        injector.move_mouse(1, 1).unwrap();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_factory_creates_a_fresh_injector_per_attach() {
        let factory = RecordingInjectorFactory::new();

        let a = factory.attach(7).unwrap();
        a.destroy().unwrap();
        let b = factory.attach(7).unwrap();

        assert!(b.move_mouse(1, 1).is_ok());
        assert_eq!(factory.created.lock().unwrap().len(), 2);
        assert_eq!(*factory.attached_pids.lock().unwrap(), vec![7, 7]);
    }

    #[test]
    fn test_failing_factory_reports_missing_process() {
        let factory = RecordingInjectorFactory {
            should_fail: true,
            ..RecordingInjectorFactory::default()
        };
        assert!(matches!(factory.attach(9), Err(InjectionError::ProcessNotFound(9))));
        assert!(factory.last().is_none());
    }
}

//! VirtualKeyboard: key events delivered through the same injector as the
//! pointer.

use std::sync::Arc;

use pointer_core::{KeyStroke, VirtualKey};
use tracing::debug;

use crate::application::cancel::{CancelSignal, Outcome};
use crate::application::inject_input::{InputInjector, KeyEvent};
use crate::application::pointer::PointerError;

/// Sends key transitions to the target process.
pub struct VirtualKeyboard {
    injector: Arc<dyn InputInjector>,
    cancel: CancelSignal,
}

impl VirtualKeyboard {
    pub fn new(injector: Arc<dyn InputInjector>, cancel: CancelSignal) -> Self {
        Self { injector, cancel }
    }

    /// Sends one transition for a named key (`"esc"`, `"f5"`) or a single
    /// printable character (`"a"`, `"~"`).  Only the character's own key is
    /// sent; holding Shift around it is up to the caller.
    ///
    /// # Errors
    ///
    /// [`PointerError::UnknownKey`] if the name maps to no virtual key;
    /// [`PointerError::Injection`] if the injector fails.
    pub fn send_key(&self, event: KeyEvent, key: &str) -> Result<Outcome, PointerError> {
        let vk = resolve(key)?;
        if self.cancel.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        self.injector.key_input(event, vk)?;
        Ok(Outcome::Completed)
    }

    /// Press followed by release, wrapped in Shift for shifted characters.
    pub fn press_key(&self, key: &str) -> Result<Outcome, PointerError> {
        let stroke = VirtualKey::parse_stroke(key)
            .ok_or_else(|| PointerError::UnknownKey(key.to_string()))?;
        self.tap(stroke)
    }

    /// Taps each character in turn.  Every character is resolved before the
    /// first one is sent, so an unknown character sends nothing.
    pub fn type_text(&self, text: &str) -> Result<Outcome, PointerError> {
        let keys = text
            .chars()
            .map(|c| VirtualKey::stroke_for(c).ok_or_else(|| PointerError::UnknownKey(c.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        for stroke in keys {
            if self.tap(stroke)?.is_cancelled() {
                debug!("typing cancelled");
                return Ok(Outcome::Cancelled);
            }
        }
        Ok(Outcome::Completed)
    }

    fn tap(&self, stroke: KeyStroke) -> Result<Outcome, PointerError> {
        if self.cancel.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        if stroke.shift {
            self.injector.key_input(KeyEvent::Press, VirtualKey::SHIFT)?;
        }
        self.injector.key_input(KeyEvent::Press, stroke.key)?;
        self.injector.key_input(KeyEvent::Release, stroke.key)?;
        if stroke.shift {
            self.injector.key_input(KeyEvent::Release, VirtualKey::SHIFT)?;
        }
        Ok(Outcome::Completed)
    }
}

fn resolve(key: &str) -> Result<VirtualKey, PointerError> {
    VirtualKey::parse(key).ok_or_else(|| PointerError::UnknownKey(key.to_string()))
}

//! LifecycleGate: acquires and releases the input session.
//!
//! # State machine
//!
//! ```text
//!            init()                      shutdown()
//! Stopped ───────────► Running ────────────────────► Stopped
//!    ▲                   │
//!    └── init() failed ──┘ (injector destroyed, nothing kept)
//! ```
//!
//! While Running the gate owns exactly one injector handle and the
//! capabilities built on it (pointer, keyboard, zone map).  Asking for a
//! capability while Stopped fails fast rather than handing out something
//! bound to a released handle.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::cancel::CancelSignal;
use crate::application::inject_input::{InjectionError, InjectorFactory, InputInjector};
use crate::application::keyboard::VirtualKeyboard;
use crate::application::overlay::OverlayHandle;
use crate::application::pointer::{PointerController, PointerSettings};
use crate::application::screen::{DisplayContext, ScreenError, ScreenProvider};
use crate::application::zones::{ZoneError, ZoneMap, ZoneSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Stopped,
    Running,
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("{component} requested while the controller is stopped")]
    NotRunning { component: &'static str },
    #[error("controller is already running")]
    AlreadyRunning,
    #[error("screen: {0}")]
    Screen(#[from] ScreenError),
    #[error("injector: {0}")]
    Injection(#[from] InjectionError),
    #[error("zones: {0}")]
    Zone(#[from] ZoneError),
}

/// The external services a gate builds its session from.
#[derive(Clone)]
pub struct Collaborators {
    pub screen: Arc<dyn ScreenProvider>,
    pub injectors: Arc<dyn InjectorFactory>,
    pub zones: Arc<dyn ZoneSource>,
    pub overlay: OverlayHandle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateSettings {
    /// Use the fixed-size client layout when building the zone map.
    pub fixed_layout: bool,
    pub pointer: PointerSettings,
}

/// Everything that exists only while Running.
struct Session {
    run_id: Uuid,
    injector: Arc<dyn InputInjector>,
    pointer: PointerController,
    keyboard: VirtualKeyboard,
    zones: ZoneMap,
}

pub struct LifecycleGate {
    collaborators: Collaborators,
    settings: GateSettings,
    cancel: CancelSignal,
    session: Option<Session>,
}

impl LifecycleGate {
    pub fn new(collaborators: Collaborators, settings: GateSettings) -> Self {
        Self {
            collaborators,
            settings,
            cancel: CancelSignal::new(),
            session: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.session.is_some() {
            ControllerState::Running
        } else {
            ControllerState::Stopped
        }
    }

    /// The stop flag shared with every capability of every run.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Id of the current run, if Running.
    pub fn run_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.run_id)
    }

    /// Stopped → Running.
    ///
    /// Clears any stale cancellation, focuses the target window, attaches an
    /// injector and builds the capabilities.  Returns the id of the new run.
    ///
    /// # Errors
    ///
    /// [`GateError::AlreadyRunning`] if called twice; otherwise the first
    /// collaborator failure.  On failure the gate stays Stopped and an
    /// injector that was already attached is destroyed.
    pub fn init(&mut self) -> Result<Uuid, GateError> {
        if self.session.is_some() {
            return Err(GateError::AlreadyRunning);
        }
        self.cancel.reset();
        let run_id = Uuid::new_v4();

        let screen = Arc::clone(&self.collaborators.screen);
        let pid = screen.target_pid()?;
        screen.focus_window()?;
        let injector = self.collaborators.injectors.attach(pid)?;

        match self.build_session(run_id, Arc::clone(&injector)) {
            Ok(session) => {
                info!(
                    %run_id,
                    pid,
                    zones = session.zones.len(),
                    fixed_layout = self.settings.fixed_layout,
                    "controller running"
                );
                self.session = Some(session);
                Ok(run_id)
            }
            Err(e) => {
                warn!(%run_id, error = %e, "init failed; releasing injector");
                if let Err(destroy_err) = injector.destroy() {
                    warn!(%run_id, error = %destroy_err, "injector release failed");
                }
                Err(e)
            }
        }
    }

    fn build_session(
        &self,
        run_id: Uuid,
        injector: Arc<dyn InputInjector>,
    ) -> Result<Session, GateError> {
        let screen = Arc::clone(&self.collaborators.screen);
        let display = DisplayContext::probe(screen.as_ref())?;
        let zones = self
            .collaborators
            .zones
            .build(self.settings.fixed_layout, display.window)?;

        let pointer = PointerController::new(
            Arc::clone(&injector),
            screen,
            display,
            self.collaborators.overlay.clone(),
            self.cancel.clone(),
            self.settings.pointer.clone(),
        );
        let keyboard = VirtualKeyboard::new(Arc::clone(&injector), self.cancel.clone());

        Ok(Session {
            run_id,
            injector,
            pointer,
            keyboard,
            zones,
        })
    }

    /// Running → Stopped.
    ///
    /// Raises the cancel signal, clears the overlay and destroys the
    /// injector.  The gate is Stopped afterwards even if the release fails.
    ///
    /// # Errors
    ///
    /// [`GateError::NotRunning`] when already Stopped;
    /// [`GateError::Injection`] if the injector could not be released.
    pub fn shutdown(&mut self) -> Result<(), GateError> {
        let session = self
            .session
            .take()
            .ok_or(GateError::NotRunning { component: "shutdown" })?;

        self.cancel.cancel();
        self.collaborators.overlay.clear();
        let Session {
            run_id, injector, ..
        } = session;
        injector.destroy()?;
        info!(%run_id, "controller stopped");
        Ok(())
    }

    // ── Capabilities ──────────────────────────────────────────────────────────

    pub fn pointer(&mut self) -> Result<&mut PointerController, GateError> {
        self.session
            .as_mut()
            .map(|s| &mut s.pointer)
            .ok_or(GateError::NotRunning { component: "pointer" })
    }

    pub fn keyboard(&self) -> Result<&VirtualKeyboard, GateError> {
        self.session
            .as_ref()
            .map(|s| &s.keyboard)
            .ok_or(GateError::NotRunning { component: "keyboard" })
    }

    pub fn zones(&self) -> Result<&ZoneMap, GateError> {
        self.session
            .as_ref()
            .map(|s| &s.zones)
            .ok_or(GateError::NotRunning { component: "zones" })
    }
}

//! Integration tests for the gate, pointer, keyboard and overlay together.
//!
//! These drive the public API end to end over the recording injector, the
//! static screen provider and the built-in zone source.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pointer_core::{PointSampler, Speed};
use pointer_driver::application::inject_input::{ButtonEvent, InjectorFactory, KeyEvent};
use pointer_driver::application::overlay::OverlayHandle;
use pointer_driver::infrastructure::input_injection::mock::RecordingInjectorFactory;
use pointer_driver::infrastructure::overlay::{OverlayEvent, OverlayRenderer, RecordingSurface};
use pointer_driver::infrastructure::screen::MockScreenProvider;
use pointer_driver::infrastructure::storage::config::AppConfig;
use pointer_driver::infrastructure::zones::StaticZoneSource;
use pointer_driver::{Collaborators, ControllerState, GateError, LifecycleGate, Outcome};

fn gate_over(
    screen: MockScreenProvider,
    overlay: OverlayHandle,
    config: &AppConfig,
) -> (LifecycleGate, Arc<RecordingInjectorFactory>) {
    let factory = Arc::new(RecordingInjectorFactory::new());
    let gate = LifecycleGate::new(
        Collaborators {
            screen: Arc::new(screen),
            injectors: Arc::clone(&factory) as Arc<dyn InjectorFactory>,
            zones: Arc::new(StaticZoneSource::classic()),
            overlay,
        },
        config.gate_settings(Some(2024)),
    );
    (gate, factory)
}

fn fast_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.motion.waypoint_delay_ms = 0;
    cfg.motion.pause_min_ms = 0;
    cfg.motion.pause_max_ms = 0;
    cfg
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_zone_click_sequence_lands_inside_zone() {
    // Arrange
    let (mut gate, factory) = gate_over(
        MockScreenProvider::windowed_1080p(),
        OverlayHandle::detached(),
        &fast_config(),
    );
    gate.init().expect("init");
    let mut sampler = PointSampler::seeded(2024);
    let zone = gate.zones().unwrap().get("inventory").unwrap();
    let target = gate
        .zones()
        .unwrap()
        .sample_point("inventory", &mut sampler)
        .unwrap();

    // Act
    let pointer = gate.pointer().unwrap();
    let moved = pointer.move_to_pause(target, Speed::Medium).unwrap();
    let clicked = pointer.middle_click(ButtonEvent::Press).unwrap();

    // Assert
    assert_eq!(moved, Outcome::Completed);
    assert_eq!(clicked, Outcome::Completed);
    assert!(zone.contains(pointer.position()));
    let injector = factory.last().unwrap();
    assert_eq!(injector.middle_inputs.lock().unwrap()[0].2, ButtonEvent::Press);
}

#[test]
fn test_fullscreen_window_uses_fullscreen_offset() {
    let (mut gate, factory) = gate_over(
        MockScreenProvider::fullscreen_1440p(),
        OverlayHandle::detached(),
        &fast_config(),
    );
    gate.init().unwrap();
    let pointer = gate.pointer().unwrap();
    let start = pointer.position();

    pointer.middle_click(ButtonEvent::Release).unwrap();

    let middles = factory.last().unwrap().middle_inputs.lock().unwrap().clone();
    assert_eq!(middles, vec![(start.x, start.y - 21, ButtonEvent::Release)]);
    assert!(pointer.tuning_factor().get() > 1.0);
}

#[test]
fn test_capabilities_follow_lifecycle() {
    let (mut gate, factory) = gate_over(
        MockScreenProvider::windowed_1080p(),
        OverlayHandle::detached(),
        &fast_config(),
    );

    assert!(matches!(gate.keyboard(), Err(GateError::NotRunning { .. })));
    gate.init().unwrap();
    assert_eq!(gate.state(), ControllerState::Running);
    gate.keyboard().unwrap().send_key(KeyEvent::Press, "esc").unwrap();
    gate.shutdown().unwrap();

    assert!(matches!(gate.keyboard(), Err(GateError::NotRunning { .. })));
    assert!(matches!(gate.shutdown(), Err(GateError::NotRunning { .. })));
    let first = factory.last().unwrap();
    assert!(first.is_destroyed());

    gate.init().unwrap();
    let second = factory.last().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!second.is_destroyed());
}

#[test]
fn test_cancel_from_another_thread_stops_a_slow_move() {
    // Arrange: the default 1 ms waypoint delay makes a long move take a while.
    let (mut gate, factory) = gate_over(
        MockScreenProvider::fullscreen_1440p(),
        OverlayHandle::detached(),
        &AppConfig::default(),
    );
    gate.init().unwrap();
    let cancel = gate.cancel_signal();
    let pointer = gate.pointer().unwrap();
    let target = if pointer.position().x > 1280 {
        pointer.position().translate(-1200, 0)
    } else {
        pointer.position().translate(1200, 0)
    };
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(15));
        cancel.cancel();
    });
    let started = Instant::now();

    // Act
    let outcome = pointer.move_to(target, Speed::Slow).unwrap();
    stopper.join().unwrap();

    // Assert
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_ne!(pointer.position(), target);
    let moves = factory.last().unwrap().mouse_moves.lock().unwrap().clone();
    let last = *moves.last().unwrap();
    assert_eq!(last, (pointer.position().x, pointer.position().y - 21));
}

#[tokio::test]
async fn test_overlay_follows_pointer_and_clears_on_shutdown() {
    // Arrange
    let surface = RecordingSurface::new();
    let (overlay, renderer) = OverlayRenderer::spawn(surface.clone());
    let (mut gate, _) = gate_over(
        MockScreenProvider::windowed_1080p(),
        overlay.clone(),
        &fast_config(),
    );

    // Act
    let final_position = tokio::task::spawn_blocking(move || {
        gate.init().unwrap();
        let pointer = gate.pointer().unwrap();
        let target = pointer.position().translate(30, 20);
        pointer.move_to(target, Speed::Fast).unwrap();
        let position = pointer.position();
        gate.shutdown().unwrap();
        position
    })
    .await
    .unwrap();
    assert_eq!(overlay.latest(), None);
    drop(overlay);
    renderer.await.unwrap();

    // Assert
    let events = surface.events();
    assert_eq!(events.last(), Some(&OverlayEvent::Cleared));
    assert!(final_position.x > 0);
}

//! pointer-driver demo binary.
//!
//! Loads the TOML config, builds a [`LifecycleGate`] over the recording
//! injector and a simulated screen, runs a short scripted sequence, and
//! shuts the gate down again.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  ├─ load_config()              -- pointer.toml, defaults if absent
//!  ├─ OverlayRenderer::spawn()   -- tokio task, latest-value channel
//!  ├─ ctrl_c task                -- raises the gate's cancel signal
//!  └─ spawn_blocking(script)
//!       ├─ gate.init()
//!       ├─ run_script()          -- zones → pointer → keyboard
//!       └─ gate.shutdown()
//! ```
//!
//! Pointer operations are synchronous and pace themselves with short
//! sleeps, so the script runs on the blocking pool rather than on a runtime
//! worker.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pointer_core::{PointSampler, Speed};
use pointer_driver::application::inject_input::InjectorFactory;
use pointer_driver::application::screen::ScreenProvider;
use pointer_driver::application::zones::ZoneSource;
use pointer_driver::infrastructure::{
    input_injection::mock::RecordingInjectorFactory,
    overlay::{OverlayRenderer, TracingSurface},
    screen::MockScreenProvider,
    storage::config::load_config,
    zones::StaticZoneSource,
};
use pointer_driver::{Collaborators, LifecycleGate, Outcome};

#[derive(Debug, Parser)]
#[command(
    name = "pointer-driver",
    about = "Drives a human-like virtual pointer against a simulated target window",
    version
)]
struct Cli {
    /// Path to the TOML config file.  Defaults apply when it does not exist.
    #[arg(long, default_value = "pointer.toml", env = "POINTER_CONFIG")]
    config: PathBuf,

    /// Seed for every random choice; overrides `driver.seed`.
    #[arg(long, env = "POINTER_SEED")]
    seed: Option<u64>,

    /// Movement speed: slow, medium, fast or fastest.
    #[arg(long)]
    speed: Option<Speed>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.driver.log_level)),
        )
        .init();

    let speed = cli.speed.unwrap_or(config.motion.default_speed);
    let settings = config.gate_settings(cli.seed);
    let seed = settings.pointer.seed;
    info!(config = %cli.config.display(), ?seed, speed = speed.label(), "pointer driver starting");

    // ── Collaborators ─────────────────────────────────────────────────────────
    let (overlay, renderer) = OverlayRenderer::spawn(TracingSurface::default());
    let injectors = Arc::new(RecordingInjectorFactory::new());
    let collaborators = Collaborators {
        screen: Arc::new(MockScreenProvider::from_config(&config.screen)) as Arc<dyn ScreenProvider>,
        injectors: Arc::clone(&injectors) as Arc<dyn InjectorFactory>,
        zones: Arc::new(StaticZoneSource::from_config(&config.zones)) as Arc<dyn ZoneSource>,
        overlay: overlay.clone(),
    };
    let mut gate = LifecycleGate::new(collaborators, settings);

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let cancel = gate.cancel_signal();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("stop requested");
            cancel.cancel();
        }
    });

    // ── Script ────────────────────────────────────────────────────────────────
    let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<Outcome> {
        let run_id = gate.init()?;
        info!(%run_id, "running demo script");
        let result = run_script(&mut gate, speed, seed);
        gate.shutdown()?;
        result
    })
    .await
    .context("script task panicked")??;

    match outcome {
        Outcome::Completed => info!("script completed"),
        Outcome::Cancelled => warn!("script cancelled"),
    }
    if let Some(injector) = injectors.last() {
        info!(
            events = injector.total_calls(),
            moves = injector.mouse_moves.lock().map(|m| m.len()).unwrap_or_default(),
            "injected"
        );
    }

    ctrl_c.abort();
    drop(overlay);
    renderer.await.context("overlay renderer panicked")?;
    info!("pointer driver stopped");
    Ok(())
}

/// Inventory click, minimap click, then escape.
fn run_script(gate: &mut LifecycleGate, speed: Speed, seed: Option<u64>) -> anyhow::Result<Outcome> {
    let mut sampler = seed.map_or_else(PointSampler::from_os_rng, PointSampler::seeded);
    let zones = gate.zones()?;
    let inventory = zones.sample_point("inventory", &mut sampler)?;
    let minimap = zones.sample_point("minimap", &mut sampler)?;

    let pointer = gate.pointer()?;
    if pointer.move_to_pause(inventory, speed)?.is_cancelled()
        || pointer.left_click()?.is_cancelled()
        || pointer.move_to_and_overshoot(minimap, speed)?.is_cancelled()
        || pointer.right_click()?.is_cancelled()
    {
        return Ok(Outcome::Cancelled);
    }
    info!(
        x = pointer.position().x,
        y = pointer.position().y,
        paths = pointer.paths_planned(),
        "pointer sequence done"
    );

    Ok(gate.keyboard()?.press_key("esc")?)
}

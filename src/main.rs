//! WindowPet headless runner.
//!
//! Drives the engine against a scripted desktop scene and logs what the
//! pet does.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ScriptedDesktop   FrameClock      LogEventSink  JsonConfigFile│
//! │  (WindowSource)    (AnimationPort) (EventSink)   (ConfigPort)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              PetService (pure logic)                   │    │
//! │  │  Snapshot · Occlusion · Kinematics · FSM               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  EventBus (signals scripted from the command line)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::filter::LevelFilter;

use windowpet::adapters::json_config::JsonConfigFile;
use windowpet::adapters::log_sink::LogEventSink;
use windowpet::adapters::scripted::{DEFAULT_CLIP_FRAMES, FrameClock, Scene, ScriptedDesktop};
use windowpet::app::ports::ConfigPort;
use windowpet::app::service::PetService;
use windowpet::events::{EventBus, Signal};
use windowpet::fsm::StateId;

/// Run the desktop pet engine against a scripted scene.
#[derive(Parser)]
#[command(name = "windowpet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene file (JSON): screen size and timed windows
    #[arg(short, long)]
    scene: PathBuf,

    /// Settings file (JSON); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "480")]
    ticks: u64,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Publish the `custom` signal at this tick
    #[arg(long)]
    custom_at: Option<u64>,

    /// Publish the `reset` signal at this tick
    #[arg(long)]
    reset_at: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))?;

    // ── Configuration ─────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => JsonConfigFile::new(path)
            .load()
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Default::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let scene = Scene::load(&cli.scene)
        .with_context(|| format!("loading scene from {}", cli.scene.display()))?;
    info!(
        "Scene: {}x{} with {} windows",
        scene.width,
        scene.height,
        scene.windows.len()
    );

    // ── Adapters ──────────────────────────────────────────────
    let clip_frames = DEFAULT_CLIP_FRAMES.max(config.jump_end_frame + 8);
    let mut desktop = ScriptedDesktop::new(scene);
    let mut clock = FrameClock::new(clip_frames, None);
    let mut sink = LogEventSink::new();
    let mut bus = EventBus::new();

    let mut service = PetService::try_new(config, desktop.screen())?;
    service.start(&mut sink);

    // ── Tick loop ─────────────────────────────────────────────
    for tick in 0..cli.ticks {
        if cli.custom_at == Some(tick) {
            bus.publish(Signal::Custom);
        }
        if cli.reset_at == Some(tick) {
            bus.publish(Signal::Reset);
        }
        service.tick(&mut bus, &mut desktop, &mut clock, &mut sink);
    }

    // ── Summary ───────────────────────────────────────────────
    let body = service.body();
    info!(
        "Done after {} ticks: state={} position=({:.0}, {:.0}) events={} frames={}",
        service.tick_count(),
        service.state().name(),
        body.position.x,
        body.position.y,
        sink.emitted(),
        clock.presented()
    );
    for id in StateId::ALL {
        info!(
            "  {:<10} entered {:>4}x",
            id.name(),
            service.fsm().enter_count(id)
        );
    }

    Ok(())
}

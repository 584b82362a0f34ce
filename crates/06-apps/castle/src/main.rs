//! Headless runner that plays a scripted Ten Second Castle session.

use anyhow::{Context, Result};
use castle::{program, CastleProgram};
use clap::Parser;
use effect::{Effect, Event, Outcome};
use orchestrator::{AppModel, DiagnosticsConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{Harness, HarnessConfig};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Play Ten Second Castle without a renderer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run a headless Ten Second Castle session")]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1800)]
    frames: u32,

    /// Frames per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Frames on which to press the pointer (repeatable).
    #[arg(long = "press", value_name = "FRAME")]
    presses: Vec<u32>,

    /// Seed for random effect outcomes.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Dump directory cleared after a fault (defaults to $CASTLE_DEBUG_DUMP_DIR or debug-dump).
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Restarts allowed before giving up.
    #[arg(long, default_value_t = runtime::DEFAULT_MAX_RESTARTS)]
    max_restarts: u32,

    /// Print the final view tree as JSON.
    #[arg(long)]
    print_view: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let diagnostics = match &args.dump_dir {
        Some(dir) => DiagnosticsConfig::new(dir),
        None => DiagnosticsConfig::from_env(),
    };

    let config = HarnessConfig {
        max_restarts: args.max_restarts,
        ..HarnessConfig::default()
    };
    let mut harness =
        Harness::with_config(program(diagnostics), config).context("failed to start program")?;
    let castle = harness.program();
    info!(
        hold_ticks = castle.splash().hold_ticks,
        round_secs = castle.game().round_secs,
        "dump directory: {}",
        castle.diagnostics().dump_dir().display()
    );
    let mut rng = StdRng::seed_from_u64(args.seed);

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let presses: BTreeSet<u32> = args.presses.iter().copied().collect();

    for frame in 0..args.frames {
        if presses.contains(&frame) {
            debug!(frame, "pointer press");
            harness.emit(Event::Pointer { x: 0.0, y: 0.0 })?;
        }
        if frame > 0 && frame % fps == 0 {
            harness.emit(Event::Tick)?;
            log_status(&harness, frame / fps);
        }
        harness
            .run_frame(dt)
            .with_context(|| format!("frame {frame} failed"))?;
        complete_pending(&mut harness, &mut rng)?;
    }

    let health = harness.health();
    info!(
        faults = health.faults,
        restarts = health.restarts,
        "session finished after {} frames",
        args.frames
    );

    if args.print_view {
        let view = harness.view()?;
        let json = serde_json::to_string_pretty(&view).context("failed to serialize view")?;
        println!("{json}");
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore error if already set.
    let _ = fmt().with_env_filter(env_filter).try_init();
}

/// Completes every queued command, drawing random outcomes from `rng`.
fn complete_pending(harness: &mut Harness<CastleProgram>, rng: &mut StdRng) -> Result<()> {
    while let Some(effect) = harness.pending_effects().into_iter().next() {
        let outcome = match effect {
            Effect::Dispatch => Outcome::Unit,
            Effect::After(_) => Outcome::Elapsed,
            Effect::Random { low, high } if low <= high => {
                Outcome::Number(rng.gen_range(low..=high))
            }
            Effect::Random { low, .. } => Outcome::Number(low),
        };
        harness.complete_next(outcome)?;
    }
    Ok(())
}

fn log_status(harness: &Harness<CastleProgram>, second: u32) {
    match harness.model() {
        Some(AppModel::Splash(splash)) => {
            info!(second, remaining = splash.remaining(), "splash");
        }
        Some(AppModel::Game(game)) => {
            info!(
                second,
                round = game.round,
                castle_hp = game.castle_hp,
                gold = game.gold,
                over = game.over,
                "siege"
            );
        }
        None => info!(second, "halted"),
    }
}

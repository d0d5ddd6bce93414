//! `skyfire`: runs the simulation core headless at 60 Hz with a scripted
//! pilot, hot-reloading the configuration file while it runs.
//!
//! Usage:
//!   skyfire --config config/skyfire.json --ticks 3600 --seed 7
//!   RUST_LOG=skyfire_sim=debug skyfire --config config/legacy.conf

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyfire_app::game_loop::{self, LoopOptions};
use skyfire_app::pilot::ScriptedPilot;
use skyfire_sim::{ConfigStore, FileSource, SimSettings, Simulation};

#[derive(Parser)]
#[command(name = "skyfire")]
#[command(about = "Run the SKYFIRE simulation core with a scripted pilot")]
struct Args {
    /// Configuration document (structured JSON or legacy flat format)
    #[arg(long, default_value = "config/skyfire.json")]
    config: PathBuf,

    /// Stop after this many ticks (default: run until interrupted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the scripted pilot
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Log a status line every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let store = ConfigStore::open(FileSource::new(&args.config))
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    let mut sim = Simulation::new(store, SimSettings::default());
    let mut pilot = ScriptedPilot::new(args.seed);
    tracing::info!(seed = args.seed, ticks = ?args.ticks, "simulation started");

    let summary = game_loop::run(
        &mut sim,
        &mut pilot,
        LoopOptions {
            max_ticks: args.ticks,
            report_every: args.report_every,
            paced: true,
        },
    );

    let reloads = sim.reload_stats();
    tracing::info!(
        frames = summary.frames,
        peak_projectiles = summary.peak_projectiles,
        reloads = reloads.applied,
        rejected = reloads.rejected,
        "simulation finished"
    );
    Ok(())
}

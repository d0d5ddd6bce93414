//! Fixed-rate frame loop: feeds pilot input into the simulation at
//! `TICK_RATE` and logs a status line every few ticks.

use std::thread;
use std::time::{Duration, Instant};

use skyfire_core::constants::{DT, TICK_RATE};
use skyfire_core::state::FrameSnapshot;
use skyfire_sim::Simulation;

use crate::pilot::ScriptedPilot;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks; run forever when `None`.
    pub max_ticks: Option<u64>,
    /// Log a status line every this many ticks; 0 disables it.
    pub report_every: u64,
    /// Sleep between ticks to hold real time. Off for headless runs.
    pub paced: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: None,
            report_every: TICK_RATE as u64,
            paced: true,
        }
    }
}

/// What the loop saw by the time it stopped.
#[derive(Debug, Clone, Default)]
pub struct LoopSummary {
    pub frames: u64,
    pub peak_projectiles: usize,
    pub last_snapshot: FrameSnapshot,
}

/// Run the simulation until `max_ticks` frames have been produced.
pub fn run(sim: &mut Simulation, pilot: &mut ScriptedPilot, options: LoopOptions) -> LoopSummary {
    let mut summary = LoopSummary::default();
    let mut next_tick_time = Instant::now();

    while options.max_ticks.map_or(true, |max| summary.frames < max) {
        // 1. Input
        let input = pilot.next_frame();

        // 2. Advance one tick
        let snapshot = sim.tick(&input, DT);
        summary.frames += 1;
        summary.peak_projectiles = summary.peak_projectiles.max(sim.projectiles().len());

        // 3. Status
        if options.report_every > 0 && summary.frames % options.report_every == 0 {
            report(sim, &snapshot);
        }
        summary.last_snapshot = snapshot;

        // 4. Sleep until next tick
        if options.paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    summary
}

fn report(sim: &Simulation, snapshot: &FrameSnapshot) {
    let weapons: Vec<&str> = sim
        .player()
        .weapons()
        .map(|w| w.profile_name.as_str())
        .collect();
    let reloads = sim.reload_stats();
    tracing::info!(
        tick = snapshot.time.tick,
        secs = snapshot.time.elapsed_secs,
        paused = snapshot.paused,
        x = snapshot.player_position.x,
        y = snapshot.player_position.y,
        projectiles = snapshot.projectiles.len(),
        stored = sim.projectiles().len(),
        weapons = ?weapons,
        reloads = reloads.applied,
        rejected = reloads.rejected,
        "status"
    );
}

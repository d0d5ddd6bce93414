//! Simulation engine: the frame-synchronous core of the game.
//!
//! `Simulation` owns the player, the projectile pool and the configuration
//! store. Each `tick` runs, in this order: input actions, player motion,
//! fire control, projectile advance/reclaim, configuration poll, snapshot.
//! Later steps read what earlier steps wrote in the same tick.

use glam::Vec2;

use skyfire_core::commands::{Action, InputFrame};
use skyfire_core::components::{Player, SpawnRequest, Weapon};
use skyfire_core::config::Configuration;
use skyfire_core::constants::{PLAYER_START_X, PLAYER_START_Y, RECLAIM_INTERVAL_TICKS};
use skyfire_core::enums::SimPhase;
use skyfire_core::error::EquipError;
use skyfire_core::state::FrameSnapshot;
use skyfire_core::types::{Playfield, SimTime};

use crate::config_store::{ConfigStore, ReloadOutcome};
use crate::systems;
use crate::systems::projectiles::ProjectilePool;

/// Settings fixed for the lifetime of a simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimSettings {
    pub playfield: Playfield,
    pub player_start: Vec2,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

/// Counts of configuration poll results that did something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadStats {
    pub applied: u32,
    pub rejected: u32,
    pub unavailable: u32,
}

/// The simulation. Owns all game state.
pub struct Simulation {
    time: SimTime,
    /// Frame time including paused frames; drives configuration polling.
    clock: f64,
    phase: SimPhase,
    playfield: Playfield,
    player: Player,
    projectiles: ProjectilePool,
    config: ConfigStore,
    spawn_buffer: Vec<SpawnRequest>,
    last_equipped: Option<String>,
    last_reclaim_tick: u64,
    reload_stats: ReloadStats,
}

impl Simulation {
    /// Create a simulation from an opened configuration store and equip the
    /// configured loadout.
    pub fn new(config: ConfigStore, settings: SimSettings) -> Self {
        let player = Player::new(settings.player_start, config.config().player_velocity);
        let mut sim = Self {
            time: SimTime::default(),
            clock: 0.0,
            phase: SimPhase::default(),
            playfield: settings.playfield,
            player,
            projectiles: ProjectilePool::new(),
            config,
            spawn_buffer: Vec::new(),
            last_equipped: None,
            last_reclaim_tick: 0,
            reload_stats: ReloadStats::default(),
        };

        let loadout = sim.config.config().loadout.clone();
        for name in &loadout {
            if let Err(err) = sim.equip(name) {
                tracing::warn!("skipping loadout entry: {err}");
            }
        }
        sim
    }

    /// Advance one frame of `dtime` seconds and return the render snapshot.
    pub fn tick(&mut self, input: &InputFrame, dtime: f64) -> FrameSnapshot {
        // 1. Input
        for action in &input.actions {
            self.apply_action(action);
        }

        if self.phase == SimPhase::Running {
            self.time.advance(dtime);
            let now = self.time.elapsed_secs;

            // 2. Player motion
            systems::motion::run(&mut self.player, input.direction(), dtime as f32);

            // 3. Fire control
            self.player.firing = input.fire;
            systems::fire_control::run(&mut self.player, now, &mut self.spawn_buffer);
            for request in self.spawn_buffer.drain(..) {
                self.projectiles.spawn(&request);
            }

            // 4. Projectiles
            self.projectiles.advance(dtime as f32, &self.playfield);
            self.reclaim_if_due();
        }

        // 5. Configuration poll
        self.clock += dtime;
        self.poll_config();

        // 6. Snapshot
        systems::snapshot::build_snapshot(&self.time, self.phase, &self.player, &self.projectiles)
    }

    /// Mount the named profile, replacing any weapon of the same pattern.
    /// An unknown name leaves the weapon set untouched.
    pub fn equip(&mut self, profile_name: &str) -> Result<(), EquipError> {
        let profile = self
            .config
            .config()
            .profile(profile_name)
            .ok_or_else(|| EquipError::UnknownWeaponReference(profile_name.to_string()))?;

        let weapon = Weapon::from_profile(profile_name, profile, self.time.elapsed_secs);
        let pattern = weapon.pattern();
        if let Some(old) = self.player.add_weapon(weapon) {
            tracing::debug!(%pattern, replaced = %old.profile_name, "weapon replaced");
        }
        tracing::info!(profile = profile_name, %pattern, "weapon equipped");
        self.last_equipped = Some(profile_name.to_string());
        Ok(())
    }

    /// Replace the loadout with the profile after the last equipped one, in
    /// name order. Returns the newly equipped profile name, or `None` when
    /// the configuration has no profiles.
    pub fn cycle_weapon(&mut self) -> Option<String> {
        let next = self
            .config
            .config()
            .next_profile_after(self.last_equipped.as_deref())?
            .to_string();

        self.player.clear_weapons();
        match self.equip(&next) {
            Ok(()) => Some(next),
            Err(err) => {
                tracing::warn!("weapon cycle failed: {err}");
                None
            }
        }
    }

    pub fn set_speed_modifier(&mut self, modifier: f32) {
        self.player.set_speed_modifier(modifier);
    }

    pub fn pause(&mut self) {
        self.phase = SimPhase::Paused;
    }

    pub fn resume(&mut self) {
        self.phase = SimPhase::Running;
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn config(&self) -> &Configuration {
        self.config.config()
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn reload_stats(&self) -> ReloadStats {
        self.reload_stats
    }

    /// Force a configuration check now, ignoring the poll interval.
    pub fn reload_config_now(&mut self) -> bool {
        let outcome = self.config.reload_if_changed();
        self.handle_reload(outcome)
    }

    fn apply_action(&mut self, action: &Action) {
        match action {
            Action::CycleWeapon => {
                self.cycle_weapon();
            }
            Action::Equip { profile } => {
                if let Err(err) = self.equip(profile) {
                    tracing::warn!("equip ignored: {err}");
                }
            }
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
        }
    }

    fn reclaim_if_due(&mut self) {
        let due = self.time.tick - self.last_reclaim_tick >= RECLAIM_INTERVAL_TICKS;
        if due || self.projectiles.needs_reclaim() {
            let reclaimed = self.projectiles.reclaim();
            if reclaimed > 0 {
                tracing::trace!(reclaimed, "projectiles reclaimed");
            }
            self.last_reclaim_tick = self.time.tick;
        }
    }

    fn poll_config(&mut self) {
        let outcome = self.config.poll(self.clock);
        self.handle_reload(outcome);
    }

    /// Record a poll result and push an applied configuration into the player.
    fn handle_reload(&mut self, outcome: ReloadOutcome) -> bool {
        match outcome {
            ReloadOutcome::Applied => {
                self.reload_stats.applied += 1;
                self.apply_config();
                true
            }
            ReloadOutcome::Rejected(_) => {
                self.reload_stats.rejected += 1;
                false
            }
            ReloadOutcome::SourceUnavailable(_) => {
                self.reload_stats.unavailable += 1;
                false
            }
            ReloadOutcome::NotDue | ReloadOutcome::Unchanged => false,
        }
    }

    /// Rebuild player parameters from the live configuration. Weapons are
    /// matched to profiles by name; one whose profile disappeared is kept
    /// as it was.
    fn apply_config(&mut self) {
        let config = self.config.config();
        self.player.base_speed = config.player_velocity;

        for weapon in self.player.weapons_mut() {
            match config.profile(&weapon.profile_name) {
                Some(profile) => weapon.retune(profile),
                None => tracing::warn!(
                    profile = %weapon.profile_name,
                    "equipped profile missing from reloaded configuration, keeping previous settings"
                ),
            }
        }
        for displaced in self.player.rekey_weapons() {
            tracing::warn!(
                profile = %displaced.profile_name,
                pattern = %displaced.pattern(),
                "weapon dropped, another reloaded profile now uses its pattern"
            );
        }
    }
}

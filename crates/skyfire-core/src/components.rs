//! Simulation components: the player craft, its weapons and projectiles.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::WeaponProfile;
use crate::constants::{COOLDOWN_EPSILON, PROJECTILE_HEIGHT, PROJECTILE_WIDTH};
use crate::enums::{FirePattern, Side};
use crate::types::Rect;

// --- Weapons ---

/// Fire pattern together with the state that pattern carries between shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternState {
    Alternate { next_side: Side },
    Dual,
    Quad,
    Single,
}

impl PatternState {
    /// State for a weapon that has not fired yet.
    pub fn fresh(pattern: FirePattern) -> Self {
        match pattern {
            FirePattern::Alternate => PatternState::Alternate {
                next_side: Side::default(),
            },
            FirePattern::Dual => PatternState::Dual,
            FirePattern::Quad => PatternState::Quad,
            FirePattern::Single => PatternState::Single,
        }
    }

    pub fn pattern(&self) -> FirePattern {
        match self {
            PatternState::Alternate { .. } => FirePattern::Alternate,
            PatternState::Dual => FirePattern::Dual,
            PatternState::Quad => FirePattern::Quad,
            PatternState::Single => FirePattern::Single,
        }
    }
}

/// A weapon mounted on the player, built from a named profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Profile this weapon was built from.
    pub profile_name: String,
    pub state: PatternState,
    /// Shots per second. Always > 0 (validated with the profile).
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_direction: Vec2,
    /// Simulated time of the last successful fire.
    pub last_fire_time: f64,
}

impl Weapon {
    /// Build a weapon whose cooldown starts at `now`.
    pub fn from_profile(name: &str, profile: &WeaponProfile, now: f64) -> Self {
        Self {
            profile_name: name.to_string(),
            state: PatternState::fresh(profile.pattern),
            fire_rate: profile.fire_rate,
            projectile_speed: profile.projectile_speed,
            projectile_damage: profile.projectile_damage,
            projectile_direction: profile.projectile_direction,
            last_fire_time: now,
        }
    }

    pub fn pattern(&self) -> FirePattern {
        self.state.pattern()
    }

    pub fn cooldown_secs(&self) -> f64 {
        1.0 / self.fire_rate as f64
    }

    /// True once the cooldown since the last fire has elapsed.
    pub fn is_ready(&self, now: f64) -> bool {
        now - self.last_fire_time >= self.cooldown_secs() - COOLDOWN_EPSILON
    }

    /// Take new parameters from a reloaded profile of the same name.
    /// Timing and toggle state survive when the pattern is unchanged.
    pub fn retune(&mut self, profile: &WeaponProfile) {
        if profile.pattern != self.pattern() {
            self.state = PatternState::fresh(profile.pattern);
        }
        self.fire_rate = profile.fire_rate;
        self.projectile_speed = profile.projectile_speed;
        self.projectile_damage = profile.projectile_damage;
        self.projectile_direction = profile.projectile_direction;
    }
}

// --- Player ---

/// The player-controlled craft.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Normalized movement direction for this tick (zero when idle).
    pub direction: Vec2,
    /// Base speed in pixels per second, from the configuration.
    pub base_speed: f32,
    /// Set by input each tick.
    pub firing: bool,
    speed_modifier: f32,
    weapons: BTreeMap<FirePattern, Weapon>,
}

impl Player {
    pub fn new(position: Vec2, base_speed: f32) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            base_speed,
            firing: false,
            speed_modifier: 1.0,
            weapons: BTreeMap::new(),
        }
    }

    /// Effective speed: base speed scaled by the modifier.
    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_modifier
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    /// Set the speed multiplier. Negative or non-finite values become 0.
    pub fn set_speed_modifier(&mut self, modifier: f32) {
        self.speed_modifier = if modifier.is_finite() {
            modifier.max(0.0)
        } else {
            0.0
        };
    }

    /// Mount a weapon, returning the weapon of the same pattern it replaced.
    pub fn add_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapons.insert(weapon.pattern(), weapon)
    }

    pub fn weapon(&self, pattern: FirePattern) -> Option<&Weapon> {
        self.weapons.get(&pattern)
    }

    /// Weapons in evaluation order.
    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    pub fn weapons_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        self.weapons.values_mut()
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn clear_weapons(&mut self) {
        self.weapons.clear();
    }

    /// Re-key weapons after a retune changed a pattern. If two weapons now
    /// share a pattern the one evaluated later wins; the losers are returned.
    pub fn rekey_weapons(&mut self) -> Vec<Weapon> {
        let weapons = std::mem::take(&mut self.weapons);
        let mut displaced = Vec::new();
        for weapon in weapons.into_values() {
            if let Some(old) = self.weapons.insert(weapon.pattern(), weapon) {
                displaced.push(old);
            }
        }
        displaced
    }
}

// --- Projectiles ---

/// A projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Cleared once the projectile leaves the playfield; never set again.
    pub enabled: bool,
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
}

impl Projectile {
    pub fn from_request(request: &SpawnRequest) -> Self {
        Self {
            enabled: true,
            position: request.position,
            direction: request.direction,
            speed: request.speed,
            damage: request.damage,
        }
    }

    /// Bounding box used for playfield culling.
    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// A projectile a weapon wants spawned this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
}

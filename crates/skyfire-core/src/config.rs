//! Configuration documents: schema, parsing and validation.
//!
//! A [`Configuration`] is only ever built through [`Configuration::parse`],
//! so every value the simulation sees has passed validation. Fire rates in
//! particular are guaranteed positive, which keeps the cooldown division in
//! the fire-control system well defined.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROJECTILE_DAMAGE, DEFAULT_PROJECTILE_DIRECTION};
use crate::enums::FirePattern;
use crate::error::ConfigError;
use crate::legacy;

/// A validated weapon profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponProfile {
    pub pattern: FirePattern,
    /// Shots per second. Always > 0.
    pub fire_rate: f32,
    pub projectile_speed: f32,
    /// Carried through to projectiles; nothing consumes it yet.
    pub projectile_damage: f32,
    pub projectile_direction: Vec2,
}

impl WeaponProfile {
    /// Minimum seconds between two fires.
    pub fn cooldown_secs(&self) -> f64 {
        1.0 / self.fire_rate as f64
    }
}

/// The live tunable parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// Player base speed in pixels per second.
    pub player_velocity: f32,
    /// Named weapon profiles, ordered by name.
    pub weapons: BTreeMap<String, WeaponProfile>,
    /// Profiles equipped when the simulation starts.
    pub loadout: Vec<String>,
}

impl Configuration {
    /// Parse either document format.
    ///
    /// A document whose first non-whitespace character is `{` is read as
    /// structured JSON; anything else is read as the flat `key value` form.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            legacy::parse(text)
        }
    }

    /// Parse and validate a structured JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_json::from_str(text)?;
        document.validate()
    }

    pub fn profile(&self, name: &str) -> Option<&WeaponProfile> {
        self.weapons.get(name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }

    /// The profile following `current` in name order, wrapping around.
    /// With no current profile this is the first profile.
    pub fn next_profile_after(&self, current: Option<&str>) -> Option<&str> {
        let first = self.weapons.keys().next()?;
        let next = current.and_then(|name| {
            self.weapons
                .range::<str, _>((
                    std::ops::Bound::Excluded(name),
                    std::ops::Bound::Unbounded,
                ))
                .next()
                .map(|(k, _)| k)
        });
        Some(next.unwrap_or(first).as_str())
    }
}

// --- On-disk schema ---

/// Structured document as written on disk, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigDocument {
    pub player_velocity: f32,
    #[serde(default)]
    pub loadout: Vec<String>,
    #[serde(default)]
    pub weapons: BTreeMap<String, WeaponProfileDocument>,
}

/// Weapon profile as written on disk. `pattern` stays a string here so an
/// unknown identifier is reported as an invalid profile, not a parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WeaponProfileDocument {
    pub pattern: String,
    pub fire_rate: f32,
    pub projectile_speed: f32,
    #[serde(default = "default_damage")]
    pub projectile_damage: f32,
    #[serde(default = "default_direction")]
    pub projectile_direction: Vec2,
}

fn default_damage() -> f32 {
    DEFAULT_PROJECTILE_DAMAGE
}

fn default_direction() -> Vec2 {
    Vec2::from_array(DEFAULT_PROJECTILE_DIRECTION)
}

impl ConfigDocument {
    pub(crate) fn validate(self) -> Result<Configuration, ConfigError> {
        if !self.player_velocity.is_finite() || self.player_velocity < 0.0 {
            return Err(ConfigError::InvalidField {
                field: "player_velocity",
                reason: format!("must be a finite, non-negative speed (got {})", self.player_velocity),
            });
        }

        let mut weapons = BTreeMap::new();
        for (name, doc) in self.weapons {
            let profile = doc.validate(&name)?;
            weapons.insert(name, profile);
        }

        if let Some(missing) = self.loadout.iter().find(|n| !weapons.contains_key(*n)) {
            return Err(ConfigError::UnknownLoadoutEntry(missing.clone()));
        }

        Ok(Configuration {
            player_velocity: self.player_velocity,
            weapons,
            loadout: self.loadout,
        })
    }
}

impl WeaponProfileDocument {
    pub(crate) fn validate(self, name: &str) -> Result<WeaponProfile, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidWeaponProfile {
            name: name.to_string(),
            reason,
        };

        let pattern: FirePattern = self.pattern.parse().map_err(invalid)?;

        if !self.fire_rate.is_finite() || self.fire_rate <= 0.0 {
            return Err(invalid(format!(
                "fire_rate must be a positive number of shots per second (got {})",
                self.fire_rate
            )));
        }
        if !self.projectile_speed.is_finite() || self.projectile_speed < 0.0 {
            return Err(invalid(format!(
                "projectile_speed must be finite and non-negative (got {})",
                self.projectile_speed
            )));
        }
        if !self.projectile_damage.is_finite() {
            return Err(invalid("projectile_damage must be finite".into()));
        }
        if !self.projectile_direction.is_finite() {
            return Err(invalid("projectile_direction must be finite".into()));
        }

        Ok(WeaponProfile {
            pattern,
            fire_rate: self.fire_rate,
            projectile_speed: self.projectile_speed,
            projectile_damage: self.projectile_damage,
            projectile_direction: self.projectile_direction,
        })
    }
}

//! Flat `key value key value ...` configuration documents.
//!
//! Each known key maps to a typed setter; unknown keys, dangling keys and
//! non-numeric values are rejected. The result is converted into a regular
//! [`Configuration`] holding one single-shot weapon that fires straight up.

use std::collections::BTreeMap;

use crate::config::{ConfigDocument, Configuration, WeaponProfileDocument};
use crate::constants::{
    DEFAULT_PROJECTILE_DAMAGE, DEFAULT_PROJECTILE_DIRECTION, LEGACY_PROFILE_NAME,
};
use crate::enums::FirePattern;
use crate::error::ConfigError;
use glam::Vec2;

/// Values read from a flat document. Missing keys stay `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LegacySettings {
    pub player_velocity: Option<f32>,
    pub player_fire_rate: Option<f32>,
    pub projectile_velocity: Option<f32>,
    /// Accepted for compatibility; bonuses are not simulated.
    pub bonus_velocity: Option<f32>,
}

type Setter = fn(&mut LegacySettings, f32);

fn set_player_velocity(s: &mut LegacySettings, v: f32) {
    s.player_velocity = Some(v);
}

fn set_player_fire_rate(s: &mut LegacySettings, v: f32) {
    s.player_fire_rate = Some(v);
}

fn set_projectile_velocity(s: &mut LegacySettings, v: f32) {
    s.projectile_velocity = Some(v);
}

fn set_bonus_velocity(s: &mut LegacySettings, v: f32) {
    s.bonus_velocity = Some(v);
}

/// Field name to setter.
const SCHEMA: &[(&str, Setter)] = &[
    ("player_velocity", set_player_velocity),
    ("player_fire_rate", set_player_fire_rate),
    ("projectile_velocity", set_projectile_velocity),
    ("bonus_velocity", set_bonus_velocity),
];

/// Read the token stream into [`LegacySettings`]. A repeated key keeps its
/// last value.
pub fn read_settings(text: &str) -> Result<LegacySettings, ConfigError> {
    let mut settings = LegacySettings::default();
    let mut tokens = text.split_whitespace();

    while let Some(key) = tokens.next() {
        let setter = SCHEMA
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, setter)| *setter)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let raw = tokens
            .next()
            .ok_or_else(|| ConfigError::MissingValue(key.to_string()))?;
        let value: f32 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        })?;

        setter(&mut settings, value);
    }

    Ok(settings)
}

/// Parse a flat document into a validated [`Configuration`].
pub fn parse(text: &str) -> Result<Configuration, ConfigError> {
    read_settings(text)?.into_configuration()
}

impl LegacySettings {
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let player_velocity = self
            .player_velocity
            .ok_or(ConfigError::MissingKey("player_velocity"))?;
        let fire_rate = self
            .player_fire_rate
            .ok_or(ConfigError::MissingKey("player_fire_rate"))?;
        let projectile_speed = self
            .projectile_velocity
            .ok_or(ConfigError::MissingKey("projectile_velocity"))?;

        let mut weapons = BTreeMap::new();
        weapons.insert(
            LEGACY_PROFILE_NAME.to_string(),
            WeaponProfileDocument {
                pattern: FirePattern::Single.as_str().to_string(),
                fire_rate,
                projectile_speed,
                projectile_damage: DEFAULT_PROJECTILE_DAMAGE,
                projectile_direction: Vec2::from_array(DEFAULT_PROJECTILE_DIRECTION),
            },
        );

        ConfigDocument {
            player_velocity,
            loadout: vec![LEGACY_PROFILE_NAME.to_string()],
            weapons,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_key_sets_its_own_field() {
        let settings = read_settings(
            "player_velocity 150\nplayer_fire_rate 12\nprojectile_velocity 500\nbonus_velocity 40\n",
        )
        .unwrap();
        assert_eq!(settings.player_velocity, Some(150.0));
        assert_eq!(settings.player_fire_rate, Some(12.0));
        assert_eq!(settings.projectile_velocity, Some(500.0));
        assert_eq!(settings.bonus_velocity, Some(40.0));
    }

    #[test]
    fn converts_to_single_upward_weapon() {
        let config = parse("player_velocity 150 player_fire_rate 12 projectile_velocity 500").unwrap();
        assert_eq!(config.player_velocity, 150.0);
        assert_eq!(config.loadout, vec![LEGACY_PROFILE_NAME]);

        let weapon = config.profile(LEGACY_PROFILE_NAME).unwrap();
        assert_eq!(weapon.pattern, FirePattern::Single);
        assert_eq!(weapon.fire_rate, 12.0);
        assert_eq!(weapon.projectile_speed, 500.0);
        assert_eq!(weapon.projectile_direction, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let settings = read_settings("player_velocity 1 player_velocity 2").unwrap();
        assert_eq!(settings.player_velocity, Some(2.0));
    }

    #[test]
    fn unknown_key_is_rejected() {
        match read_settings("player_speed 100") {
            Err(ConfigError::UnknownKey(key)) => assert_eq!(key, "player_speed"),
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn dangling_key_is_rejected() {
        assert!(matches!(
            read_settings("player_velocity 100 projectile_velocity"),
            Err(ConfigError::MissingValue(_))
        ));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        assert!(matches!(
            read_settings("player_velocity fast"),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn missing_required_key_is_rejected() {
        assert!(matches!(
            parse("player_velocity 100 projectile_velocity 300"),
            Err(ConfigError::MissingKey("player_fire_rate"))
        ));
    }

    #[test]
    fn zero_fire_rate_is_rejected() {
        assert!(matches!(
            parse("player_velocity 100 player_fire_rate 0 projectile_velocity 300"),
            Err(ConfigError::InvalidWeaponProfile { .. })
        ));
    }
}

//! Error types shared by the configuration layer and the simulation.

use thiserror::Error;

/// Why a configuration document could not be loaded.
///
/// At startup any of these is fatal. During a later poll the previous
/// configuration stays live and the error is only reported.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access configuration source {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("configuration key '{0}' has no value")]
    MissingValue(String),

    #[error("required configuration key '{0}' is missing")]
    MissingKey(&'static str),

    #[error("value '{value}' for '{key}' is not a number")]
    InvalidNumber { key: String, value: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid weapon profile '{name}': {reason}")]
    InvalidWeaponProfile { name: String, reason: String },

    #[error("loadout names unknown weapon profile '{0}'")]
    UnknownLoadoutEntry(String),
}

/// A request to equip something the live configuration does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("no weapon profile named '{0}'")]
    UnknownWeaponReference(String),
}

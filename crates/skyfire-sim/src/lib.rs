//! Simulation engine for SKYFIRE.
//!
//! Owns the player, the projectile pool and the live configuration, runs the
//! systems once per frame and produces `FrameSnapshot`s for a renderer.

pub mod config_store;
pub mod engine;
pub mod systems;

pub use config_store::{ChangeToken, ConfigSource, ConfigStore, FileSource, ReloadOutcome};
pub use engine::{ReloadStats, SimSettings, Simulation};
pub use skyfire_core as core;

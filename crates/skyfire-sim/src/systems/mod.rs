//! Systems that operate on the simulation state each tick.
//!
//! Systems are plain functions over the state they touch. They do not own
//! state; the `Simulation` aggregate does.

pub mod fire_control;
pub mod motion;
pub mod projectiles;
pub mod snapshot;

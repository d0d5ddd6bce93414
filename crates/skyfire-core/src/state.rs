//! Read-only snapshot handed to the renderer after every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::SimTime;

/// Everything a renderer may see. It never gets write access to the
/// simulation itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub player_position: Vec2,
    /// Positions of enabled projectiles only.
    pub projectiles: Vec<Vec2>,
}

//! Input handed to the simulation each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete actions delivered alongside the held-key state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Replace the loadout with the next weapon profile in name order.
    CycleWeapon,
    /// Mount the named profile, replacing any weapon of the same pattern.
    Equip { profile: String },
    /// Stop advancing motion, weapons and projectiles.
    Pause,
    /// Continue after a pause.
    Resume,
}

/// One tick of input: four independent direction impulses, the fire button
/// and any discrete actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl InputFrame {
    /// Normalized direction request (screen Y grows downward). Zero when
    /// nothing is held or opposite impulses cancel.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The shape/count/offset rule a weapon uses on a single fire event.
///
/// Declaration order is the order weapons are evaluated in each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirePattern {
    /// One shot per fire, muzzle alternating left/right.
    Alternate,
    /// Two parallel shots per fire.
    Dual,
    /// Two splayed shots per fire from wide muzzles.
    Quad,
    /// One centered shot per fire.
    Single,
}

impl FirePattern {
    pub const ALL: [FirePattern; 4] = [
        FirePattern::Alternate,
        FirePattern::Dual,
        FirePattern::Quad,
        FirePattern::Single,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FirePattern::Alternate => "alternate",
            FirePattern::Dual => "dual",
            FirePattern::Quad => "quad",
            FirePattern::Single => "single",
        }
    }
}

impl fmt::Display for FirePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FirePattern::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown fire pattern '{s}'"))
    }
}

/// Which muzzle the alternate pattern fires from next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of the horizontal muzzle offset.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Whether the simulation is advancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

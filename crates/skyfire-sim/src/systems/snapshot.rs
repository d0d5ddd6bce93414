//! Snapshot system: builds the read-only view handed to the renderer.

use skyfire_core::components::Player;
use skyfire_core::enums::SimPhase;
use skyfire_core::state::FrameSnapshot;
use skyfire_core::types::SimTime;

use crate::systems::projectiles::ProjectilePool;

pub fn build_snapshot(
    time: &SimTime,
    phase: SimPhase,
    player: &Player,
    projectiles: &ProjectilePool,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        paused: phase == SimPhase::Paused,
        player_position: player.position,
        projectiles: projectiles.enabled_positions(),
    }
}

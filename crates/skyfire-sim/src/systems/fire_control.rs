//! Fire control system: cooldown gating and fire-pattern emission.
//!
//! Each weapon is either idle (cooldown running) or ready. A fire request
//! while ready emits the weapon's pattern, stamps `last_fire_time` and puts
//! the weapon back to idle. Every pattern is a pure function of the muzzle
//! origin and the shot parameters; the alternate pattern also flips its side.

use glam::Vec2;

use skyfire_core::components::{PatternState, Player, SpawnRequest, Weapon};
use skyfire_core::constants::{NARROW_MUZZLE_OFFSET, WIDE_MUZZLE_OFFSET};
use skyfire_core::enums::Side;

/// Per-shot parameters shared by every projectile of one fire event.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
}

impl Shot {
    fn of(weapon: &Weapon) -> Self {
        Self {
            direction: weapon.projectile_direction,
            speed: weapon.projectile_speed,
            damage: weapon.projectile_damage,
        }
    }

    fn spawn_at(&self, position: Vec2) -> SpawnRequest {
        SpawnRequest {
            position,
            direction: self.direction,
            speed: self.speed,
            damage: self.damage,
        }
    }
}

/// Run fire control for every weapon on the player. Weapons are gated
/// independently, so several may fire in the same tick.
/// Returns the number of weapons that fired.
pub fn run(player: &mut Player, now: f64, out: &mut Vec<SpawnRequest>) -> usize {
    if !player.firing {
        return 0;
    }

    let origin = player.position;
    let mut fired = 0;
    for weapon in player.weapons_mut() {
        if try_fire(weapon, origin, now, out) {
            fired += 1;
        }
    }
    fired
}

/// Fire one weapon if its cooldown has elapsed.
pub fn try_fire(weapon: &mut Weapon, origin: Vec2, now: f64, out: &mut Vec<SpawnRequest>) -> bool {
    if !weapon.is_ready(now) {
        tracing::trace!(
            profile = %weapon.profile_name,
            remaining = weapon.cooldown_secs() - (now - weapon.last_fire_time),
            "weapon cooling down"
        );
        return false;
    }

    let shot = Shot::of(weapon);
    match &mut weapon.state {
        PatternState::Alternate { next_side } => fire_alternate(next_side, origin, &shot, out),
        PatternState::Dual => fire_dual(origin, &shot, out),
        PatternState::Quad => fire_quad(origin, &shot, out),
        PatternState::Single => fire_single(origin, &shot, out),
    }
    weapon.last_fire_time = now;
    true
}

/// One projectile from the current side, then switch sides.
pub fn fire_alternate(next_side: &mut Side, origin: Vec2, shot: &Shot, out: &mut Vec<SpawnRequest>) {
    let offset = Vec2::new(next_side.sign() * NARROW_MUZZLE_OFFSET, 0.0);
    out.push(shot.spawn_at(origin + offset));
    *next_side = next_side.flipped();
}

/// Two parallel projectiles from both narrow muzzles.
pub fn fire_dual(origin: Vec2, shot: &Shot, out: &mut Vec<SpawnRequest>) {
    let offset = Vec2::new(NARROW_MUZZLE_OFFSET, 0.0);
    out.push(shot.spawn_at(origin - offset));
    out.push(shot.spawn_at(origin + offset));
}

/// Two projectiles from the wide muzzles; the right one flies X-mirrored.
pub fn fire_quad(origin: Vec2, shot: &Shot, out: &mut Vec<SpawnRequest>) {
    let offset = Vec2::new(WIDE_MUZZLE_OFFSET, 0.0);
    out.push(shot.spawn_at(origin - offset));

    let mirrored = Shot {
        direction: Vec2::new(-shot.direction.x, shot.direction.y),
        ..*shot
    };
    out.push(mirrored.spawn_at(origin + offset));
}

/// One centered projectile.
pub fn fire_single(origin: Vec2, shot: &Shot, out: &mut Vec<SpawnRequest>) {
    out.push(shot.spawn_at(origin));
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfire_core::config::WeaponProfile;
    use skyfire_core::enums::FirePattern;

    fn weapon(pattern: FirePattern, fire_rate: f32, direction: Vec2) -> Weapon {
        let profile = WeaponProfile {
            pattern,
            fire_rate,
            projectile_speed: 400.0,
            projectile_damage: 1.0,
            projectile_direction: direction,
        };
        Weapon::from_profile("test", &profile, 0.0)
    }

    fn x_offsets(origin: Vec2, requests: &[SpawnRequest]) -> Vec<f32> {
        requests.iter().map(|r| r.position.x - origin.x).collect()
    }

    #[test]
    fn test_alternate_flips_sides() {
        let mut w = weapon(FirePattern::Alternate, 10.0, Vec2::new(0.0, -1.0));
        let origin = Vec2::new(200.0, 300.0);
        let mut out = Vec::new();

        assert!(try_fire(&mut w, origin, 1.0, &mut out));
        assert!(try_fire(&mut w, origin, 2.0, &mut out));
        assert!(try_fire(&mut w, origin, 3.0, &mut out));

        assert_eq!(x_offsets(origin, &out), vec![-10.0, 10.0, -10.0]);
        assert!(out.iter().all(|r| r.position.y == origin.y));
        assert!(out.iter().all(|r| r.direction == Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_dual_emits_parallel_pair() {
        let mut w = weapon(FirePattern::Dual, 10.0, Vec2::new(0.0, -1.0));
        let origin = Vec2::new(50.0, 50.0);
        let mut out = Vec::new();

        assert!(try_fire(&mut w, origin, 1.0, &mut out));
        assert_eq!(out.len(), 2);
        assert_eq!(x_offsets(origin, &out), vec![-10.0, 10.0]);
        assert_eq!(out[0].direction, out[1].direction);
    }

    #[test]
    fn test_quad_emits_splayed_pair() {
        let mut w = weapon(FirePattern::Quad, 10.0, Vec2::new(0.25, -1.0));
        let origin = Vec2::new(50.0, 50.0);
        let mut out = Vec::new();

        assert!(try_fire(&mut w, origin, 1.0, &mut out));
        assert_eq!(out.len(), 2);
        assert_eq!(x_offsets(origin, &out), vec![-15.0, 15.0]);
        assert_eq!(out[0].direction, Vec2::new(0.25, -1.0));
        assert_eq!(out[1].direction, Vec2::new(-0.25, -1.0));
        assert_eq!(out[0].direction.y, out[1].direction.y);
    }

    #[test]
    fn test_single_fires_from_origin() {
        let mut w = weapon(FirePattern::Single, 10.0, Vec2::new(0.0, -1.0));
        let mut out = Vec::new();
        assert!(try_fire(&mut w, Vec2::new(7.0, 8.0), 1.0, &mut out));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, Vec2::new(7.0, 8.0));
        assert_eq!(out[0].speed, 400.0);
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut w = weapon(FirePattern::Single, 16.0, Vec2::new(0.0, -1.0));
        let mut out = Vec::new();

        assert!(!try_fire(&mut w, Vec2::ZERO, 0.05, &mut out));
        assert!(out.is_empty());
        assert_eq!(w.last_fire_time, 0.0);

        assert!(try_fire(&mut w, Vec2::ZERO, 0.0625, &mut out));
        assert_eq!(w.last_fire_time, 0.0625);

        // Next shot no earlier than one cooldown later.
        assert!(!try_fire(&mut w, Vec2::ZERO, 0.1, &mut out));
        assert!(try_fire(&mut w, Vec2::ZERO, 0.125, &mut out));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_suppressed_alternate_does_not_flip() {
        let mut w = weapon(FirePattern::Alternate, 1.0, Vec2::new(0.0, -1.0));
        let mut out = Vec::new();
        assert!(try_fire(&mut w, Vec2::ZERO, 1.0, &mut out));
        assert!(!try_fire(&mut w, Vec2::ZERO, 1.5, &mut out));
        assert!(try_fire(&mut w, Vec2::ZERO, 2.0, &mut out));
        assert_eq!(x_offsets(Vec2::ZERO, &out), vec![-10.0, 10.0]);
    }

    #[test]
    fn test_run_fires_each_weapon_independently() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 0.0);
        player.add_weapon(weapon(FirePattern::Dual, 10.0, Vec2::new(0.0, -1.0)));
        player.add_weapon(weapon(FirePattern::Quad, 2.0, Vec2::new(0.0, -1.0)));
        player.firing = true;
        let mut out = Vec::new();

        // Both ready: 2 + 2 projectiles.
        assert_eq!(run(&mut player, 0.5, &mut out), 2);
        assert_eq!(out.len(), 4);

        // Only the dual weapon is ready again.
        out.clear();
        assert_eq!(run(&mut player, 0.65, &mut out), 1);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_run_without_request_does_nothing() {
        let mut player = Player::new(Vec2::ZERO, 0.0);
        player.add_weapon(weapon(FirePattern::Dual, 10.0, Vec2::new(0.0, -1.0)));
        let mut out = Vec::new();
        assert_eq!(run(&mut player, 5.0, &mut out), 0);
        assert!(out.is_empty());
        assert_eq!(player.weapon(FirePattern::Dual).unwrap().last_fire_time, 0.0);
    }
}

//! Player motion: Euler integration of direction and speed.
//!
//! The player is not clamped to the playfield and may fly off screen.

use glam::Vec2;

use skyfire_core::components::Player;

/// `position + direction * speed * dtime`. `direction` is unit length or zero.
pub fn advance(position: Vec2, direction: Vec2, speed: f32, dtime: f32) -> Vec2 {
    position + direction * speed * dtime
}

/// Apply this tick's direction request to the player.
pub fn run(player: &mut Player, direction: Vec2, dtime: f32) {
    player.direction = direction;
    player.position = advance(player.position, direction, player.speed(), dtime);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_right() {
        let pos = advance(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 200.0, 0.1);
        assert!((pos.x - 120.0).abs() < 1e-4, "x was {}", pos.x);
        assert_eq!(pos.y, 100.0);
    }

    #[test]
    fn test_zero_direction_stays_put() {
        let pos = advance(Vec2::new(3.0, 4.0), Vec2::ZERO, 500.0, 1.0);
        assert_eq!(pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_no_clamping_at_screen_edge() {
        let pos = advance(Vec2::new(5.0, 5.0), Vec2::new(-1.0, 0.0), 100.0, 1.0);
        assert_eq!(pos, Vec2::new(-95.0, 5.0));
    }

    #[test]
    fn test_run_uses_modified_speed() {
        let mut player = Player::new(Vec2::new(0.0, 0.0), 100.0);
        player.set_speed_modifier(2.0);
        run(&mut player, Vec2::new(0.0, 1.0), 0.5);
        assert_eq!(player.position, Vec2::new(0.0, 100.0));
        assert_eq!(player.direction, Vec2::new(0.0, 1.0));
    }
}

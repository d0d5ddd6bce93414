//! Scripted pilot: a seeded stand-in for a human at the keyboard.
//!
//! The pilot holds a random direction for a random number of ticks, keeps
//! the fire button down most of the time and now and then asks for the
//! next weapon profile. The same seed always produces the same frames.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyfire_core::commands::{Action, InputFrame};

/// Shortest and longest time a direction is held, in ticks.
const MIN_HOLD_TICKS: u32 = 15;
const MAX_HOLD_TICKS: u32 = 90;

/// Chance per tick of requesting a weapon cycle (about once every 10 s).
const CYCLE_ODDS: (u32, u32) = (1, 600);

pub struct ScriptedPilot {
    rng: ChaCha8Rng,
    held: InputFrame,
    hold_remaining: u32,
}

impl ScriptedPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: InputFrame::default(),
            hold_remaining: 0,
        }
    }

    /// Input for the next tick.
    pub fn next_frame(&mut self) -> InputFrame {
        if self.hold_remaining == 0 {
            self.held = self.pick_held();
            self.hold_remaining = self.rng.gen_range(MIN_HOLD_TICKS..=MAX_HOLD_TICKS);
        }
        self.hold_remaining -= 1;

        let mut frame = self.held.clone();
        if self.rng.gen_ratio(CYCLE_ODDS.0, CYCLE_ODDS.1) {
            frame.actions.push(Action::CycleWeapon);
        }
        frame
    }

    fn pick_held(&mut self) -> InputFrame {
        // Opposite keys are never held together, so the pilot always moves
        // when it means to.
        let horizontal = self.rng.gen_range(-1i8..=1);
        let vertical = self.rng.gen_range(-1i8..=1);
        InputFrame {
            left: horizontal < 0,
            right: horizontal > 0,
            up: vertical < 0,
            down: vertical > 0,
            fire: self.rng.gen_bool(0.8),
            actions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = ScriptedPilot::new(42);
        let mut b = ScriptedPilot::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_frame(), b.next_frame());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = ScriptedPilot::new(1);
        let mut b = ScriptedPilot::new(2);
        let same = (0..1000).all(|_| a.next_frame() == b.next_frame());
        assert!(!same);
    }

    #[test]
    fn test_direction_held_for_minimum_ticks() {
        let mut pilot = ScriptedPilot::new(9);
        let first = pilot.next_frame();
        for _ in 1..MIN_HOLD_TICKS {
            let frame = pilot.next_frame();
            assert_eq!(frame.direction(), first.direction());
            assert_eq!(frame.fire, first.fire);
        }
    }

    #[test]
    fn test_never_holds_opposite_keys() {
        let mut pilot = ScriptedPilot::new(3);
        for _ in 0..5000 {
            let frame = pilot.next_frame();
            assert!(!(frame.left && frame.right));
            assert!(!(frame.up && frame.down));
        }
    }
}

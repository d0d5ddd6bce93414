//! Projectile pool: spawn, advance, cull and reclaim.
//!
//! Projectiles live as entities in a hecs world. Leaving the playfield only
//! clears the `enabled` flag; `reclaim` later despawns disabled entities
//! through a pre-allocated buffer, keeping storage bounded.

use glam::Vec2;
use hecs::{Entity, World};

use skyfire_core::components::{Projectile, SpawnRequest};
use skyfire_core::constants::RECLAIM_THRESHOLD;
use skyfire_core::types::Playfield;

pub struct ProjectilePool {
    world: World,
    /// Disabled projectiles still held in `world`.
    disabled: usize,
    reclaim_buffer: Vec<Entity>,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            disabled: 0,
            reclaim_buffer: Vec::new(),
        }
    }

    /// Append a new enabled projectile.
    pub fn spawn(&mut self, request: &SpawnRequest) -> Entity {
        self.world.spawn((Projectile::from_request(request),))
    }

    /// Move every enabled projectile and disable the ones whose bounding box
    /// no longer intersects the playfield. Returns how many were disabled.
    pub fn advance(&mut self, dtime: f32, playfield: &Playfield) -> usize {
        let field = playfield.rect();
        let mut culled = 0;

        for (_entity, projectile) in self.world.query_mut::<&mut Projectile>() {
            if !projectile.enabled {
                continue;
            }
            projectile.position += projectile.direction * projectile.speed * dtime;
            if !projectile.bounds().intersects(&field) {
                projectile.enabled = false;
                culled += 1;
            }
        }

        self.disabled += culled;
        culled
    }

    /// True once enough disabled projectiles have piled up to reclaim early.
    pub fn needs_reclaim(&self) -> bool {
        self.disabled >= RECLAIM_THRESHOLD
    }

    /// Despawn every disabled projectile. Returns how many were removed.
    pub fn reclaim(&mut self) -> usize {
        self.reclaim_buffer.clear();

        for (entity, projectile) in self.world.query_mut::<&Projectile>() {
            if !projectile.enabled {
                self.reclaim_buffer.push(entity);
            }
        }

        let reclaimed = self.reclaim_buffer.len();
        for entity in self.reclaim_buffer.drain(..) {
            let despawned = self.world.despawn(entity);
            debug_assert!(despawned.is_ok(), "reclaim buffer held a dead entity");
        }
        self.disabled = 0;
        reclaimed
    }

    /// Stored projectiles, enabled or not.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn enabled_count(&self) -> usize {
        self.len() - self.disabled
    }

    pub fn disabled_count(&self) -> usize {
        self.disabled
    }

    /// Copies of the enabled projectiles, in storage order.
    pub fn enabled(&self) -> Vec<Projectile> {
        self.world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.enabled)
            .map(|(_, p)| *p)
            .collect()
    }

    /// Positions of the enabled projectiles, for rendering.
    pub fn enabled_positions(&self) -> Vec<Vec2> {
        self.world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.enabled)
            .map(|(_, p)| p.position)
            .collect()
    }

    /// Look up one projectile by handle, if it has not been reclaimed.
    pub fn get(&self, entity: Entity) -> Option<Projectile> {
        self.world.get::<&Projectile>(entity).ok().map(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(x: f32, y: f32, direction: Vec2, speed: f32) -> SpawnRequest {
        SpawnRequest {
            position: Vec2::new(x, y),
            direction,
            speed,
            damage: 1.0,
        }
    }

    #[test]
    fn test_spawn_and_advance_along_direction() {
        let mut pool = ProjectilePool::new();
        let id = pool.spawn(&request(100.0, 200.0, Vec2::new(0.0, -1.0), 300.0));
        pool.advance(0.5, &Playfield::default());

        let p = pool.get(id).unwrap();
        assert!(p.enabled);
        assert_eq!(p.position, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_leaving_playfield_disables_same_tick() {
        let mut pool = ProjectilePool::new();
        let id = pool.spawn(&request(100.0, 5.0, Vec2::new(0.0, -1.0), 100.0));

        // Still straddling the top edge after the first step.
        assert_eq!(pool.advance(0.1, &Playfield::default()), 0);
        assert!(pool.get(id).unwrap().enabled);

        // Box now ends above y = 0.
        assert_eq!(pool.advance(0.1, &Playfield::default()), 1);
        let p = pool.get(id).unwrap();
        assert!(!p.enabled);
        assert_eq!(pool.enabled_count(), 0);
        assert_eq!(pool.disabled_count(), 1);
    }

    #[test]
    fn test_disabled_projectile_stays_disabled_and_frozen() {
        let mut pool = ProjectilePool::new();
        let id = pool.spawn(&request(399.5, 100.0, Vec2::new(1.0, 0.0), 100.0));
        pool.advance(0.1, &Playfield::default());
        let frozen = pool.get(id).unwrap();
        assert!(!frozen.enabled);

        // A direction that would bring it back changes nothing.
        for _ in 0..10 {
            pool.advance(0.1, &Playfield::default());
        }
        let later = pool.get(id).unwrap();
        assert!(!later.enabled);
        assert_eq!(later.position, frozen.position);
    }

    #[test]
    fn test_reclaim_removes_only_disabled() {
        let mut pool = ProjectilePool::new();
        let keep = pool.spawn(&request(200.0, 200.0, Vec2::ZERO, 0.0));
        let gone = pool.spawn(&request(200.0, -50.0, Vec2::ZERO, 0.0));
        pool.advance(0.016, &Playfield::default());
        assert_eq!(pool.len(), 2);

        assert_eq!(pool.reclaim(), 1);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.disabled_count(), 0);
        assert!(pool.get(keep).is_some());
        assert!(pool.get(gone).is_none());
    }

    #[test]
    fn test_needs_reclaim_at_threshold() {
        let mut pool = ProjectilePool::new();
        for i in 0..RECLAIM_THRESHOLD {
            pool.spawn(&request(i as f32, -100.0, Vec2::ZERO, 0.0));
        }
        assert!(!pool.needs_reclaim());
        pool.advance(0.016, &Playfield::default());
        assert!(pool.needs_reclaim());
        pool.reclaim();
        assert!(!pool.needs_reclaim());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_enabled_positions_skip_disabled() {
        let mut pool = ProjectilePool::new();
        pool.spawn(&request(10.0, 10.0, Vec2::ZERO, 0.0));
        pool.spawn(&request(-40.0, 10.0, Vec2::ZERO, 0.0));
        pool.advance(0.016, &Playfield::default());
        assert_eq!(pool.enabled_positions(), vec![Vec2::new(10.0, 10.0)]);
        assert_eq!(pool.enabled().len(), 1);
    }
}

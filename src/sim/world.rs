//! Entity registry
//!
//! Owns the live platform, obstacle, power-up and particle collections and
//! the spawn/despawn primitives the other components go through.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Particle, Platform, PowerUp, PowerUpKind};
use crate::consts::{BURST_PARTICLES, MAX_PARTICLES};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Corridor segments (fixed count, ordered by id)
    pub platforms: Vec<Platform>,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Live power-ups (spawn order)
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: u32,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        let mut world = Self {
            platforms: Vec::with_capacity(tuning.platform_count),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            next_id: 0,
        };
        world.reset(tuning);
        world
    }

    /// Drop all content and lay the corridor out from the origin.
    /// Platform `i` sits at `z = -i * spacing`.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.platforms.clear();
        self.next_id = 0;

        for i in 0..tuning.platform_count {
            let id = self.next_entity_id();
            self.platforms.push(Platform {
                id,
                pos: Vec3::new(0.0, 0.0, -(i as f32) * tuning.platform_spacing),
            });
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_obstacle(&mut self, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, pos });
        id
    }

    pub fn spawn_power_up(&mut self, kind: PowerUpKind, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp { id, kind, pos });
        id
    }

    pub fn despawn_obstacle(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    pub fn despawn_power_up(&mut self, id: u32) -> Option<PowerUp> {
        let idx = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(idx))
    }

    /// Drop obstacles and power-ups more than `distance` behind the player
    pub fn sweep_behind(&mut self, player_z: f32, distance: f32) {
        self.obstacles.retain(|o| o.pos.z - player_z <= distance);
        self.power_ups.retain(|p| p.pos.z - player_z <= distance);
    }

    /// Spawn a burst of fragments flying out of `origin`.
    /// The oldest fragments are dropped once the global cap is reached.
    pub fn spawn_burst(&mut self, origin: Vec3, rng: &mut impl Rng, tuning: &Tuning) {
        let spread = tuning.particle_spread;
        for _ in 0..BURST_PARTICLES {
            let vel = Vec3::new(
                (rng.random::<f32>() - 0.5) * spread,
                rng.random::<f32>() * spread,
                (rng.random::<f32>() - 0.5) * spread,
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                age: 0,
            });
        }

        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Move, damp and age fragments; drop the expired ones
    pub fn update_particles(&mut self, tuning: &Tuning) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= tuning.particle_damping;
            particle.age += 1;
        }
        let lifetime = tuning.particle_lifetime_ticks;
        self.particles.retain(|p| p.age < lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_canonical_corridor() {
        let tuning = Tuning::default();
        let world = World::new(&tuning);
        assert_eq!(world.platforms.len(), 15);
        for (i, platform) in world.platforms.iter().enumerate() {
            assert_eq!(platform.id, i as u32);
            assert_eq!(platform.pos.z, -(i as f32) * 10.0);
        }
    }

    #[test]
    fn test_spawn_and_despawn() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let a = world.spawn_obstacle(Vec3::new(0.0, 1.0, -30.0));
        let b = world.spawn_obstacle(Vec3::new(1.0, 1.0, -40.0));
        let p = world.spawn_power_up(PowerUpKind::Shield, Vec3::new(0.0, 1.1, -50.0));
        assert_ne!(a, b);

        assert_eq!(world.despawn_obstacle(a).map(|o| o.id), Some(a));
        assert!(world.despawn_obstacle(a).is_none());
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(
            world.despawn_power_up(p).map(|p| p.kind),
            Some(PowerUpKind::Shield)
        );
        assert!(world.power_ups.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);
        world.spawn_burst(Vec3::ZERO, &mut rng, &tuning);
        assert_eq!(world.particles.len(), BURST_PARTICLES);

        for _ in 0..tuning.particle_lifetime_ticks - 1 {
            world.update_particles(&tuning);
        }
        assert_eq!(world.particles.len(), BURST_PARTICLES);
        world.update_particles(&tuning);
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            world.spawn_burst(Vec3::ZERO, &mut rng, &tuning);
        }
        assert_eq!(world.particles.len(), MAX_PARTICLES);
    }
}

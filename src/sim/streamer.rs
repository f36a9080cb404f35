//! World streaming
//!
//! Keeps a fixed-length corridor of platforms around the player by moving
//! platforms that fall behind to the far end, rolling for obstacle and
//! power-up spawns each time one moves.

use glam::Vec3;
use rand::Rng;

use super::state::PowerUpKind;
use super::world::World;
use crate::tuning::Tuning;

/// Recycle platforms behind the player. Returns the number recycled.
///
/// Platforms only ever move by whole corridor lengths, so their positions
/// modulo the corridor length never change.
pub fn stream(world: &mut World, player_z: f32, rng: &mut impl Rng, tuning: &Tuning) -> usize {
    let corridor = tuning.corridor_length();
    let mut spawn_sites = Vec::new();

    for platform in &mut world.platforms {
        if platform.pos.z - player_z > tuning.recycle_distance {
            platform.pos.z -= corridor;
            spawn_sites.push(platform.pos.z);
            log::trace!("Recycled platform {} to z={}", platform.id, platform.pos.z);
        }
    }

    for &z in &spawn_sites {
        roll_content(world, z, rng, tuning);
    }
    world.sweep_behind(player_z, corridor);
    spawn_sites.len()
}

/// Bring the far end of the corridor back behind a player who was just
/// teleported back along the travel axis. Nothing spawns. Returns the number
/// of platforms moved.
pub fn rewind(world: &mut World, player_z: f32, tuning: &Tuning) -> usize {
    let corridor = tuning.corridor_length();
    let mut moved = 0;
    for platform in &mut world.platforms {
        while player_z - platform.pos.z > corridor - tuning.recycle_distance {
            platform.pos.z += corridor;
            moved += 1;
        }
    }
    if moved > 0 {
        log::trace!("Rewound {} platform(s) behind z={}", moved, player_z);
    }
    moved
}

/// Independently roll for an obstacle and a power-up ahead of the platform
/// centered at `platform_z`
fn roll_content(world: &mut World, platform_z: f32, rng: &mut impl Rng, tuning: &Tuning) {
    if rng.random_bool(tuning.obstacle_chance) {
        let pos = Vec3::new(
            spawn_x(rng, tuning),
            tuning.obstacle_height,
            platform_z - rng.random::<f32>() * tuning.spawn_depth,
        );
        world.spawn_obstacle(pos);
    }

    if rng.random_bool(tuning.power_up_chance) {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let pos = Vec3::new(
            spawn_x(rng, tuning),
            tuning.power_up_height,
            platform_z - rng.random::<f32>() * tuning.spawn_depth,
        );
        world.spawn_power_up(kind, pos);
    }
}

fn spawn_x(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * tuning.spawn_half_width
}

//! Collision detection and response
//!
//! Three independent passes against current-frame positions: ground support,
//! obstacle damage and power-up pickup. No swept tests; per-tick motion is
//! small enough that tunnelling through an obstacle is accepted.

use glam::Vec3;

use super::session::{Damage, GameSession, LifeLost};
use super::state::{GameEvent, Platform, Player};
use crate::tuning::Tuning;

/// True when `a` and `b` are closer than `tolerance` on every axis
#[inline]
pub fn within_box(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    let d = (a - b).abs();
    d.x < tolerance && d.y < tolerance && d.z < tolerance
}

/// Whether `platform` holds the player up: horizontal footprint inside the
/// platform and not above its support height
pub fn supports(platform: &Platform, player: &Player, tuning: &Tuning) -> bool {
    let p = player.pos;
    let half_width = tuning.platform_width / 2.0;
    let half_length = tuning.platform_length / 2.0;
    p.x > platform.pos.x - half_width
        && p.x < platform.pos.x + half_width
        && p.z > platform.pos.z - half_length
        && p.z < platform.pos.z + half_length
        && p.y <= tuning.support_height
}

/// Ground pass. Grounded is cleared and only set again by a supporting
/// platform. Returns the new grounded flag.
pub fn resolve_ground(player: &mut Player, platforms: &[Platform], tuning: &Tuning) -> bool {
    player.grounded = false;
    for platform in platforms {
        if supports(platform, player, tuning) {
            player.pos.y = tuning.support_height;
            player.vel_y = 0.0;
            player.grounded = true;
        }
    }
    player.grounded
}

/// Obstacle pass. A hit destroys the obstacle; unshielded hits cost a life.
/// Obstacles are checked in spawn order against the player's current
/// position, which moves after a respawn. Stops at game over.
pub fn resolve_obstacles(session: &mut GameSession) {
    let tolerance = session.tuning.obstacle_tolerance;
    loop {
        let pos = session.player.pos;
        let Some(id) = session
            .world
            .obstacles
            .iter()
            .find(|o| within_box(pos, o.pos, tolerance))
            .map(|o| o.id)
        else {
            return;
        };

        session.world.despawn_obstacle(id);

        // Shield stays up for its whole duration, however many hits it takes
        if session.stats.shielded {
            session.events.push(GameEvent::ShieldBlocked);
            continue;
        }

        if session.lose_life(Damage::Obstacle, pos) == LifeLost::GameOver {
            return;
        }
    }
}

/// Pickup pass. Each power-up within the pickup radius is consumed and its
/// effect activated at `now`.
pub fn collect_power_ups(session: &mut GameSession, now: f64) {
    let radius = session.tuning.pickup_radius;
    loop {
        let pos = session.player.pos;
        let Some(id) = session
            .world
            .power_ups
            .iter()
            .find(|p| p.pos.distance(pos) < radius)
            .map(|p| p.id)
        else {
            return;
        };

        let Some(power_up) = session.world.despawn_power_up(id) else {
            return;
        };
        session
            .effects
            .activate(power_up.kind, now, &mut session.stats, &session.tuning);
        session.events.push(GameEvent::PowerUpCollected(power_up.kind));
    }
}

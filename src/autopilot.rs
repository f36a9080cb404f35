//! Idle/demo mode - an AI that plays the game
//!
//! Produces the held controls a player would press this tick. Jumps
//! obstacles that are about to hit, sidesteps ones further out, and drifts
//! toward power-ups when the lane is clear.

use glam::Vec3;

use crate::sim::{GameSession, TickInput};

/// Obstacles closer than this (along the travel axis) are jumped
const JUMP_RANGE: f32 = 3.0;
/// Obstacles closer than this are dodged sideways
const DODGE_RANGE: f32 = 8.0;
/// Power-ups closer than this are chased
const CHASE_RANGE: f32 = 15.0;
/// Keep this far inside the platform edge
const EDGE_MARGIN: f32 = 0.6;

/// Controls for the current tick
pub fn steer(session: &GameSession) -> TickInput {
    let player = &session.player;
    let tuning = &session.tuning;
    let mut input = TickInput::default();

    // Positive when `pos` is ahead of the player
    let ahead = |pos: Vec3| player.pos.z - pos.z;
    let lane_width = tuning.obstacle_tolerance + 0.2;

    let threat = session
        .world
        .obstacles
        .iter()
        .filter(|o| {
            let d = ahead(o.pos);
            d > -tuning.obstacle_tolerance
                && d < DODGE_RANGE
                && (o.pos.x - player.pos.x).abs() < lane_width
        })
        .min_by(|a, b| ahead(a.pos).total_cmp(&ahead(b.pos)));

    let target_x = if let Some(obstacle) = threat {
        if ahead(obstacle.pos) < JUMP_RANGE {
            input.jump = player.grounded;
            None
        } else {
            // Sidestep toward whichever side has more room
            let limit = tuning.platform_width / 2.0 - EDGE_MARGIN;
            let left = obstacle.pos.x - lane_width;
            let right = obstacle.pos.x + lane_width;
            let side = if left + limit > limit - right { left } else { right };
            Some(side.clamp(-limit, limit))
        }
    } else {
        session
            .world
            .power_ups
            .iter()
            .filter(|p| {
                let d = ahead(p.pos);
                d > 0.0 && d < CHASE_RANGE
            })
            .min_by(|a, b| ahead(a.pos).total_cmp(&ahead(b.pos)))
            .map(|p| p.pos.x)
            .or(Some(0.0))
    };

    if let Some(x) = target_x {
        let dx = x - player.pos.x;
        if dx > tuning.lateral_speed {
            input.right = true;
        } else if dx < -tuning.lateral_speed {
            input.left = true;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use crate::tuning::Tuning;

    fn running() -> GameSession {
        let mut session = GameSession::new(3, Tuning::default());
        session.reset();
        session
    }

    #[test]
    fn test_idle_on_empty_lane() {
        let session = running();
        assert_eq!(steer(&session), TickInput::default());
    }

    #[test]
    fn test_jumps_close_obstacle() {
        let mut session = running();
        session.world.spawn_obstacle(Vec3::new(0.0, 1.0, -1.5));
        let input = steer(&session);
        assert!(input.jump);
    }

    #[test]
    fn test_jump_range_edge() {
        let mut session = running();
        session.world.spawn_obstacle(Vec3::new(0.0, 1.0, -2.9));
        assert!(steer(&session).jump);

        let mut session = running();
        session.world.spawn_obstacle(Vec3::new(0.0, 1.0, -3.2));
        assert!(!steer(&session).jump);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut session = running();
        session.player.grounded = false;
        session.world.spawn_obstacle(Vec3::new(0.0, 1.0, -1.5));
        assert!(!steer(&session).jump);
    }

    #[test]
    fn test_sidesteps_distant_obstacle() {
        let mut session = running();
        session.player.pos.x = 0.5;
        session.world.spawn_obstacle(Vec3::new(0.8, 1.0, -6.0));
        let input = steer(&session);
        assert!(input.left);
        assert!(!input.jump);
    }

    #[test]
    fn test_chases_power_up() {
        let mut session = running();
        session
            .world
            .spawn_power_up(PowerUpKind::Shield, Vec3::new(1.5, 1.1, -10.0));
        let input = steer(&session);
        assert!(input.right);
        assert!(!input.left);
    }
}

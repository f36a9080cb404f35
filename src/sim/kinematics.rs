//! Player kinematics
//!
//! Forward auto-run, lateral steering, jumping and gravity. Runs before
//! collision, which re-derives `grounded` afterwards.

use super::state::Player;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Advance the player by one tick
pub fn integrate(player: &mut Player, input: &TickInput, forward_speed: f32, tuning: &Tuning) {
    // Travel axis runs toward -z
    player.pos.z -= forward_speed;

    // Left and right apply independently and cancel when both are held
    if input.left {
        player.pos.x -= tuning.lateral_speed;
    }
    if input.right {
        player.pos.x += tuning.lateral_speed;
    }

    if input.jump && player.grounded {
        player.vel_y = tuning.jump_velocity;
        player.grounded = false;
    }

    // Gravity always applies; ground support snaps it back
    player.vel_y -= tuning.gravity;
    player.pos.y += player.vel_y;
}

//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use serde::{Deserialize, Serialize};

use super::session::GameSession;
use super::state::GameEvent;
use super::{collision, kinematics, streamer};

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the session by one fixed timestep. Does nothing unless running.
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.events.clear();
    if !session.is_running() {
        return;
    }

    session.time_ticks += 1;
    // One clock sample for every timer check this tick
    let now = session.now();

    kinematics::integrate(
        &mut session.player,
        input,
        session.stats.forward_speed,
        &session.tuning,
    );

    streamer::stream(
        &mut session.world,
        session.player.pos.z,
        &mut session.rng,
        &session.tuning,
    );

    collision::resolve_ground(&mut session.player, &session.world.platforms, &session.tuning);
    collision::resolve_obstacles(session);
    if !session.is_running() {
        return;
    }
    collision::collect_power_ups(session, now);

    for kind in session
        .effects
        .expire(now, &mut session.stats, &session.tuning)
    {
        session.events.push(GameEvent::EffectExpired(kind));
    }

    session.accrue_score();

    if session.check_fall().is_some() && !session.is_running() {
        return;
    }

    session.world.update_particles(&session.tuning);
}

//! Per-frame state handed to the rendering backend and HUD
//!
//! Read-only view of a session. Nothing here feeds back into the simulation.

use glam::Vec3;
use serde::Serialize;

use crate::consts::{
    OBSTACLE_COLOR, PARTICLE_COLOR, PLATFORM_COLOR, PLAYER_COLOR, PLAYER_SHIELD_COLOR,
};
use crate::sim::{EffectTimer, GameSession, PowerUpKind, RunState};
use crate::tuning::Tuning;

/// Something to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub pos: Vec3,
    /// 0xRRGGBB
    pub color: u32,
}

/// The player has no entity id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub color: u32,
    pub grounded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec3,
    pub color: u32,
    /// 1.0 when spawned, 0.0 at the end of its lifetime
    pub fade: f32,
}

/// Chase camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraView {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraView {
    /// Raised behind the player, looking along the travel axis
    pub fn follow(player: Vec3, tuning: &Tuning) -> Self {
        Self {
            position: player + tuning.camera_offset,
            look_at: player - Vec3::Z * tuning.camera_look_ahead,
        }
    }
}

/// HUD readout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    /// Active effects with time left
    pub power_ups: Vec<EffectTimer>,
    /// Set once the run has ended
    pub final_score: Option<u64>,
}

/// Everything the presentation layers need for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub state: RunState,
    pub player: PlayerView,
    pub platforms: Vec<EntityView>,
    pub obstacles: Vec<EntityView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub camera: CameraView,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let tuning = &session.tuning;
        let world = &session.world;
        let player_color = if session.stats.shielded {
            PLAYER_SHIELD_COLOR
        } else {
            PLAYER_COLOR
        };
        let lifetime = tuning.particle_lifetime_ticks.max(1) as f32;

        Self {
            tick: session.time_ticks,
            state: session.state,
            player: PlayerView {
                pos: session.player.pos,
                color: player_color,
                grounded: session.player.grounded,
            },
            platforms: world
                .platforms
                .iter()
                .map(|p| EntityView {
                    id: p.id,
                    pos: p.pos,
                    color: PLATFORM_COLOR,
                })
                .collect(),
            obstacles: world
                .obstacles
                .iter()
                .map(|o| EntityView {
                    id: o.id,
                    pos: o.pos,
                    color: OBSTACLE_COLOR,
                })
                .collect(),
            power_ups: world
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    color: p.kind.color(),
                })
                .collect(),
            particles: world
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: PARTICLE_COLOR,
                    fade: (1.0 - p.age as f32 / lifetime).max(0.0),
                })
                .collect(),
            camera: CameraView::follow(session.player.pos, tuning),
            hud: Hud {
                score: session.stats.score,
                lives: session.stats.lives,
                power_ups: session.effects.timers(session.now()),
                final_score: session.final_score,
            },
        }
    }
}

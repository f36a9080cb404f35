//! Neon Runner - An endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, streaming, collisions, effects, session)
//! - `snapshot`: Per-frame state handed to rendering and HUD layers
//! - `game`: Fixed-timestep frame driver
//! - `autopilot`: Idle/demo mode input
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod game;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use game::Game;
pub use snapshot::{FrameSnapshot, Hud};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (the rate the per-tick tuning is calibrated for)
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will accumulate (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Lives granted on reset
    pub const STARTING_LIVES: u8 = 3;

    /// Fragments per destruction burst
    pub const BURST_PARTICLES: usize = 18;
    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;

    /// Player colors
    pub const PLAYER_COLOR: u32 = 0x00ffcc;
    pub const PLAYER_SHIELD_COLOR: u32 = 0x00aaff;
    /// Entity colors
    pub const PLATFORM_COLOR: u32 = 0x121217;
    pub const OBSTACLE_COLOR: u32 = 0xff4d4d;
    pub const PARTICLE_COLOR: u32 = 0xff3333;
}

/// Round seconds to one decimal place for display
#[inline]
pub fn round_tenths(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}

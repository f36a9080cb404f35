//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod kinematics;
pub mod session;
pub mod state;
pub mod streamer;
pub mod tick;
pub mod world;

pub use effects::{ActiveEffects, EffectRule, EffectTimer};
pub use session::{Damage, GameSession, LifeLost};
pub use state::{
    GameEvent, Obstacle, Particle, Platform, Player, PowerUp, PowerUpKind, RunState, RunStats,
};
pub use tick::{TickInput, tick};
pub use world::World;

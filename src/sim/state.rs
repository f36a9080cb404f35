//! Entity and session value types
//!
//! Plain data shared by every simulation component.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for the first start; simulation frozen
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives exhausted; simulation frozen until reset
    GameOver,
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Vertical velocity (units per tick)
    pub vel_y: f32,
    /// Supported by a platform this tick (re-derived every tick)
    pub grounded: bool,
}

impl Player {
    /// Player standing at the corridor origin
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.support_height, 0.0),
            vel_y: 0.0,
            grounded: true,
        }
    }

    /// Penalty teleport: back to the lane center and standing height,
    /// `offset` units back along the travel axis
    pub fn respawn(&mut self, offset: f32, tuning: &Tuning) {
        self.pos = Vec3::new(0.0, tuning.support_height, self.pos.z + offset);
        self.vel_y = 0.0;
    }
}

/// A corridor segment. Recycled in place, never destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec3,
}

/// A hazard that costs a life on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Shield,
    Score,
}

impl PowerUpKind {
    /// All kinds, in dispatch-table order
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Speed, PowerUpKind::Shield, PowerUpKind::Score];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Score => "score",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "speed" => Some(PowerUpKind::Speed),
            "shield" => Some(PowerUpKind::Shield),
            "score" => Some(PowerUpKind::Score),
            _ => None,
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
}

/// A destruction fragment (visual only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Ticks since spawn
    pub age: u32,
}

/// Session counters touched by collisions and power-up effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u64,
    pub lives: u8,
    /// Travel-axis distance covered per tick
    pub forward_speed: f32,
    /// Obstacles are absorbed while set
    pub shielded: bool,
}

impl RunStats {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: crate::consts::STARTING_LIVES,
            forward_speed: tuning.base_speed,
            shielded: false,
        }
    }
}

/// Notable things that happened during a tick (for audio/HUD feedback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Unshielded obstacle contact
    ObstacleHit { lives_left: u8 },
    /// Obstacle destroyed by an active shield
    ShieldBlocked,
    /// Dropped below the fall threshold
    Fell { lives_left: u8 },
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    /// Difficulty boundary crossed
    SpeedUp { forward_speed: f32 },
    GameOver { final_score: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for kind in PowerUpKind::ALL {
            assert_eq!(PowerUpKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PowerUpKind::from_name("SHIELD"), Some(PowerUpKind::Shield));
        assert_eq!(PowerUpKind::from_name("magnet"), None);
    }

    #[test]
    fn test_respawn_moves_back_along_travel_axis() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning);
        player.pos = Vec3::new(1.5, 0.3, -42.0);
        player.vel_y = -0.4;

        player.respawn(20.0, &tuning);
        assert_eq!(player.pos, Vec3::new(0.0, 1.0, -22.0));
        assert_eq!(player.vel_y, 0.0);
    }
}

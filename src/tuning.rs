//! Data-driven game balance
//!
//! Every per-tick constant the simulation uses. Values are calibrated for a
//! fixed 60 Hz tick (see [`crate::consts::SIM_DT`]).

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Forward speed on reset; expiries never push speed below this
    pub base_speed: f32,
    /// Difficulty scaling stops raising speed at this value
    pub max_speed: f32,
    /// Speed added each time score crosses a difficulty boundary
    pub difficulty_step: f32,
    /// Score interval between difficulty boundaries
    pub difficulty_interval: u64,

    // === Player ===
    pub lateral_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Player center height when standing on a platform
    pub support_height: f32,

    // === Corridor ===
    pub platform_count: usize,
    /// Distance between neighbouring platform centers
    pub platform_spacing: f32,
    pub platform_width: f32,
    pub platform_length: f32,
    /// A platform this far behind the player is recycled to the front
    pub recycle_distance: f32,

    // === Spawning ===
    pub obstacle_chance: f64,
    pub power_up_chance: f64,
    /// Spawns land within +/- this distance of the corridor center line
    pub spawn_half_width: f32,
    /// Spawns land up to this far ahead of the recycled platform's center
    pub spawn_depth: f32,
    pub obstacle_height: f32,
    pub power_up_height: f32,

    // === Collision ===
    /// Per-axis overlap distance for obstacle hits
    pub obstacle_tolerance: f32,
    pub pickup_radius: f32,
    /// Travel-axis penalty after an obstacle hit
    pub hit_respawn_offset: f32,
    /// Travel-axis penalty after falling off the corridor
    pub fall_respawn_offset: f32,
    pub fall_threshold: f32,

    // === Power-ups ===
    pub speed_boost: f32,
    pub speed_duration: f64,
    pub shield_duration: f64,
    pub score_duration: f64,
    pub score_bonus: u64,

    // === Particles ===
    pub particle_spread: f32,
    pub particle_damping: f32,
    pub particle_lifetime_ticks: u32,

    // === Camera ===
    /// Camera position relative to the player
    pub camera_offset: Vec3,
    /// Camera looks this far ahead of the player along the travel axis
    pub camera_look_ahead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 0.15,
            max_speed: 0.45,
            difficulty_step: 0.02,
            difficulty_interval: 500,

            lateral_speed: 0.15,
            jump_velocity: 0.25,
            gravity: 0.015,
            support_height: 1.0,

            platform_count: 15,
            platform_spacing: 10.0,
            platform_width: 5.0,
            platform_length: 10.0,
            recycle_distance: 20.0,

            obstacle_chance: 0.3,
            power_up_chance: 0.15,
            spawn_half_width: 2.0,
            spawn_depth: 6.0,
            obstacle_height: 1.0,
            power_up_height: 1.1,

            obstacle_tolerance: 1.0,
            pickup_radius: 1.2,
            hit_respawn_offset: 20.0,
            fall_respawn_offset: 30.0,
            fall_threshold: -5.0,

            speed_boost: 0.12,
            speed_duration: 5.0,
            shield_duration: 5.0,
            score_duration: 1.2,
            score_bonus: 200,

            particle_spread: 0.3,
            particle_damping: 0.95,
            particle_lifetime_ticks: 90,

            camera_offset: Vec3::new(0.0, 6.0, 12.0),
            camera_look_ahead: 5.0,
        }
    }
}

impl Tuning {
    /// Total corridor length (platform count x spacing)
    pub fn corridor_length(&self) -> f32 {
        self.platform_count as f32 * self.platform_spacing
    }

    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.platform_count == 0 {
            return Err(invalid("platform_count", "must be at least 1"));
        }
        if self.platform_spacing <= 0.0 {
            return Err(invalid("platform_spacing", "must be positive"));
        }
        if self.base_speed <= 0.0 {
            return Err(invalid("base_speed", "must be positive"));
        }
        if self.max_speed < self.base_speed {
            return Err(invalid(
                "max_speed",
                format!("must be >= base_speed ({})", self.base_speed),
            ));
        }
        if self.difficulty_interval == 0 {
            return Err(invalid("difficulty_interval", "must be at least 1"));
        }
        for (field, p) in [
            ("obstacle_chance", self.obstacle_chance),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("must be within [0, 1], got {p}")));
            }
        }
        for (field, secs) in [
            ("speed_duration", self.speed_duration),
            ("shield_duration", self.shield_duration),
            ("score_duration", self.score_duration),
        ] {
            if secs <= 0.0 {
                return Err(invalid(field, "must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.corridor_length(), 150.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 0.2, "max_speed": 0.5 }"#).unwrap();
        assert_eq!(tuning.base_speed, 0.2);
        assert_eq!(tuning.max_speed, 0.5);
        assert_eq!(tuning.platform_count, 15);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "obstacle_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacle_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_max_below_base() {
        let err = Tuning::from_json(r#"{ "max_speed": 0.1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_speed", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}

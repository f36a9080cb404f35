//! Game session controller
//!
//! The aggregate that owns every piece of simulation state, plus the
//! lifecycle, lives, score and difficulty rules.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::state::{GameEvent, Player, RunState, RunStats};
use super::streamer;
use super::world::World;
use crate::consts::SIM_HZ;
use crate::tuning::Tuning;

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    Obstacle,
    Fall,
}

/// What happened after a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLost {
    /// Teleported back along the travel axis, still running
    Respawned,
    /// Out of lives; session ended
    GameOver,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub state: RunState,
    /// Simulation tick counter (since last reset)
    pub time_ticks: u64,
    pub player: Player,
    pub world: World,
    pub stats: RunStats,
    pub effects: ActiveEffects,
    /// Score at the moment of the last game over
    pub final_score: Option<u64>,
    /// Difficulty boundaries already applied
    difficulty_level: u64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session waiting for its first start
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: RunState::NotStarted,
            time_ticks: 0,
            player: Player::spawn(&tuning),
            world: World::new(&tuning),
            stats: RunStats::new(&tuning),
            effects: ActiveEffects::default(),
            final_score: None,
            difficulty_level: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Restore the canonical starting state and begin running.
    /// Same result whatever state the session was in.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.world.reset(&self.tuning);
        self.stats = RunStats::new(&self.tuning);
        self.effects.clear();
        self.time_ticks = 0;
        self.difficulty_level = 0;
        self.final_score = None;
        self.events.clear();
        self.state = RunState::Running;
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Freeze the simulation and record the final score
    pub fn end(&mut self) {
        self.state = RunState::GameOver;
        self.final_score = Some(self.stats.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.stats.score,
        });
        log::info!("Game over - final score {}", self.stats.score);
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Session clock in seconds
    pub fn now(&self) -> f64 {
        self.time_ticks as f64 / SIM_HZ
    }

    /// Per-tick score, then difficulty scaling
    pub fn accrue_score(&mut self) {
        self.stats.score += 1;
        self.apply_difficulty();
    }

    /// Raise forward speed once for each newly crossed score boundary
    pub fn apply_difficulty(&mut self) {
        let level = self.stats.score / self.tuning.difficulty_interval;
        while self.difficulty_level < level {
            self.difficulty_level += 1;
            let speed = self.stats.forward_speed;
            if speed < self.tuning.max_speed {
                self.stats.forward_speed =
                    (speed + self.tuning.difficulty_step).min(self.tuning.max_speed);
                self.events.push(GameEvent::SpeedUp {
                    forward_speed: self.stats.forward_speed,
                });
                log::debug!(
                    "Difficulty level {} - speed {:.3}",
                    self.difficulty_level,
                    self.stats.forward_speed
                );
            }
        }
    }

    /// Lose a life: burst at `burst_at`, then either end the session or
    /// teleport the player back by the damage's respawn offset
    pub fn lose_life(&mut self, cause: Damage, burst_at: Vec3) -> LifeLost {
        self.stats.lives = self.stats.lives.saturating_sub(1);
        let lives_left = self.stats.lives;
        self.world.spawn_burst(burst_at, &mut self.rng, &self.tuning);

        self.events.push(match cause {
            Damage::Obstacle => GameEvent::ObstacleHit { lives_left },
            Damage::Fall => GameEvent::Fell { lives_left },
        });
        log::debug!("{:?} - {} lives left", cause, lives_left);

        if lives_left == 0 {
            self.end();
            return LifeLost::GameOver;
        }

        let offset = match cause {
            Damage::Obstacle => self.tuning.hit_respawn_offset,
            Damage::Fall => self.tuning.fall_respawn_offset,
        };
        self.player.respawn(offset, &self.tuning);
        streamer::rewind(&mut self.world, self.player.pos.z, &self.tuning);
        LifeLost::Respawned
    }

    /// Treat dropping below the fall threshold like a hit
    pub fn check_fall(&mut self) -> Option<LifeLost> {
        let pos = self.player.pos;
        if pos.y >= self.tuning.fall_threshold {
            return None;
        }
        Some(self.lose_life(Damage::Fall, Vec3::new(pos.x, 0.0, pos.z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUpKind;

    fn running() -> GameSession {
        let mut session = GameSession::new(42, Tuning::default());
        session.reset();
        session
    }

    #[test]
    fn test_new_session_is_frozen() {
        let session = GameSession::new(42, Tuning::default());
        assert_eq!(session.state, RunState::NotStarted);
        assert!(!session.is_running());
    }

    #[test]
    fn test_reset_is_canonical() {
        let mut session = running();
        let canonical = (
            session.player.clone(),
            session.world.clone(),
            session.stats.clone(),
        );

        // Dirty everything
        session.player.pos = Vec3::new(2.0, -3.0, -400.0);
        session.world.spawn_obstacle(Vec3::new(0.0, 1.0, -410.0));
        session.world.spawn_power_up(PowerUpKind::Speed, Vec3::new(0.0, 1.1, -420.0));
        session.world.platforms[3].pos.z -= 150.0;
        let now = session.now();
        session
            .effects
            .activate(PowerUpKind::Shield, now, &mut session.stats, &session.tuning);
        session.stats.score = 1234;
        session.end();

        session.reset();
        assert_eq!(session.state, RunState::Running);
        assert_eq!(
            (session.player.clone(), session.world.clone(), session.stats.clone()),
            canonical
        );
        assert!(session.effects.is_empty());
        assert_eq!(session.final_score, None);

        // Consecutive resets change nothing
        session.reset();
        assert_eq!(
            (session.player.clone(), session.world.clone(), session.stats.clone()),
            canonical
        );
    }

    #[test]
    fn test_difficulty_once_per_boundary() {
        let mut session = running();
        session.stats.score = 498;
        session.accrue_score();
        assert_eq!(session.stats.forward_speed, 0.15);

        session.accrue_score(); // 500
        let boosted = session.stats.forward_speed;
        assert!((boosted - 0.17).abs() < 1e-6);

        for _ in 0..4 {
            session.accrue_score(); // 501..=504
        }
        assert_eq!(session.stats.forward_speed, boosted);
    }

    #[test]
    fn test_difficulty_capped() {
        let mut session = running();
        session.stats.forward_speed = 0.44;
        session.stats.score = 499;
        session.accrue_score();
        assert_eq!(session.stats.forward_speed, 0.45);

        session.stats.score = 999;
        session.accrue_score();
        assert_eq!(session.stats.forward_speed, 0.45);
    }

    #[test]
    fn test_lose_life_respawns_then_ends() {
        let mut session = running();
        session.player.pos.z = -80.0;

        assert_eq!(
            session.lose_life(Damage::Obstacle, session.player.pos),
            LifeLost::Respawned
        );
        assert_eq!(session.stats.lives, 2);
        assert_eq!(session.player.pos.z, -60.0);

        assert_eq!(
            session.lose_life(Damage::Fall, session.player.pos),
            LifeLost::Respawned
        );
        assert_eq!(session.player.pos.z, -30.0);

        session.stats.score = 77;
        assert_eq!(
            session.lose_life(Damage::Obstacle, session.player.pos),
            LifeLost::GameOver
        );
        assert_eq!(session.state, RunState::GameOver);
        assert_eq!(session.final_score, Some(77));
        assert_eq!(session.player.pos.z, -30.0);
        assert_eq!(session.world.particles.len(), 3 * crate::consts::BURST_PARTICLES);
    }

    #[test]
    fn test_fall_threshold() {
        let mut session = running();
        session.player.pos.y = -4.9;
        assert_eq!(session.check_fall(), None);

        session.player.pos = Vec3::new(1.0, -5.1, -12.0);
        assert_eq!(session.check_fall(), Some(LifeLost::Respawned));
        assert_eq!(session.player.pos, Vec3::new(0.0, 1.0, 18.0));
        assert_eq!(session.events, vec![GameEvent::Fell { lives_left: 2 }]);
        // Burst sits at ground level under the fall point
        assert_eq!(session.world.particles[0].pos, Vec3::new(1.0, 0.0, -12.0));
        // The far end of the corridor came back to hold the respawn point
        assert!(session
            .world
            .platforms
            .iter()
            .any(|p| (p.pos.z - 18.0).abs() < session.tuning.platform_length / 2.0));
    }
}

//! Fixed-timestep frame driver
//!
//! Turns variable frame times into whole simulation ticks and hands back a
//! snapshot for the presentation layer each frame.

use crate::autopilot;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameSession, TickInput, tick};
use crate::snapshot::FrameSnapshot;
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    pub session: GameSession,
    accumulator: f64,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
    /// Events from every tick run during the last frame
    pub events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            session: GameSession::new(seed, tuning),
            accumulator: 0.0,
            idle_mode: false,
            events: Vec::new(),
        }
    }

    /// Start button
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.events.clear();
        self.session.reset();
    }

    /// Restart button (same as start)
    pub fn restart(&mut self) {
        self.start();
    }

    /// Run simulation ticks for `dt` seconds of frame time. Returns the
    /// number of ticks run.
    pub fn update(&mut self, dt: f64, held: &TickInput) -> u32 {
        // A bad frame time counts as an empty frame
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        self.events.clear();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = if self.idle_mode {
                autopilot::steer(&self.session)
            } else {
                *held
            };
            tick(&mut self.session, &input);
            self.events.extend_from_slice(&self.session.events);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.accumulator >= SIM_DT {
            log::warn!(
                "Frame fell behind by {:.1} ms, dropping it",
                self.accumulator * 1000.0
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Advance one rendered frame and capture the result
    pub fn frame(&mut self, dt: f64, held: &TickInput) -> FrameSnapshot {
        self.update(dt, held);
        FrameSnapshot::capture(&self.session)
    }
}

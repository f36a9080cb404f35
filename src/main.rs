//! Neon Runner entry point
//!
//! Headless runner: drives the simulation at a fixed frame rate, optionally
//! with the autopilot, and can stream per-frame snapshots as JSON lines.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use neon_runner::sim::{GameEvent, RunState, TickInput};
use neon_runner::{Game, Tuning};

#[derive(Parser)]
#[command(name = "neon-runner")]
#[command(about = "Headless endless-runner simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Run seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Presentation frame rate the frames are paced at
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Let the AI play
    #[arg(long)]
    autopilot: bool,

    /// Print one JSON snapshot per frame to stdout
    #[arg(long)]
    json: bool,

    /// Start a new run when the current one ends instead of stopping
    #[arg(long)]
    restart_on_game_over: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    anyhow::ensure!(cli.fps > 0.0, "--fps must be positive, got {}", cli.fps);

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Neon Runner starting with seed {}", seed);

    let mut game = Game::new(seed, tuning);
    game.idle_mode = cli.autopilot;
    game.start();

    let frame_dt = 1.0 / cli.fps;
    let held = TickInput::default();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut runs = 1u32;
    let mut best = 0u64;

    for _ in 0..cli.frames {
        let snapshot = game.frame(frame_dt, &held);
        if cli.json {
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        }

        if snapshot.state == RunState::GameOver {
            let score = snapshot.hud.final_score.unwrap_or(snapshot.hud.score);
            best = best.max(score);
            log::info!("Run {} over after {} ticks, score {}", runs, snapshot.tick, score);
            if !cli.restart_on_game_over {
                break;
            }
            runs += 1;
            game.restart();
        } else {
            for event in &game.events {
                if let GameEvent::PowerUpCollected(kind) = event {
                    log::debug!("Picked up {}", kind.as_str());
                }
            }
        }
    }
    out.flush()?;

    let session = &game.session;
    best = best.max(session.stats.score);
    log::info!(
        "Finished {} run(s): state {:?}, ticks {}, score {}, lives {}, best {}",
        runs,
        session.state,
        session.time_ticks,
        session.stats.score,
        session.stats.lives,
        best
    );
    Ok(())
}

//! Tilt Shooter headless runner
//!
//! Drives a session with the autopilot on a simulated display clock and
//! reports how the run went. Rendering belongs to the host app; this binary
//! exercises the simulation end to end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tilt_shooter::autopilot::Autopilot;
use tilt_shooter::sim::GameEvent;
use tilt_shooter::{FrameOutcome, Session, Settings};

#[derive(Parser, Debug)]
#[command(about = "Run a headless tilt-shooter session driven by the autopilot", version)]
struct Args {
    /// Number of display frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Settings JSON (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Keep playing after the run ends by pressing restart
    #[arg(long)]
    auto_restart: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Tilt Shooter (headless) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");

    let mut session = Session::new(settings);
    let sender = session.sender();
    let mut pilot = Autopilot::new(args.seed);
    let frame_time = 1.0 / args.fps;

    let mut token = session.start();
    let mut runs = 0u32;
    let mut kills = 0u32;

    for frame in 0..args.frames {
        let now = frame as f64 * frame_time;
        for command in pilot.commands(session.state()) {
            sender.send(command);
        }

        let outcome = match token {
            Some(t) => session.frame(t, now),
            None => FrameOutcome::Stopped,
        };
        kills += session
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count() as u32;

        if outcome == FrameOutcome::Stopped {
            if token.is_some() {
                runs += 1;
                let state = session.state();
                log::info!(
                    "Run {} ended at frame {}: score={} lives={}",
                    runs,
                    frame,
                    state.score,
                    state.lives
                );
                token = None;
            }
            if !args.auto_restart {
                break;
            }
            // Restart button: apply the queued command, then start a fresh loop
            session.pump();
            token = session.start();
        }
    }

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let result = snapshot
            .overlay
            .as_ref()
            .map(|o| o.title.as_str())
            .unwrap_or("In progress");
        println!(
            "{result}: score={} lives={} wave={} enemies destroyed={kills}",
            snapshot.hud.score, snapshot.hud.lives, snapshot.hud.wave
        );
    }
    Ok(())
}

//! Sub Rescue entry point
//!
//! Headless native runner: plays a whole session with the autopilot on a
//! simulated 60 Hz clock, logs notifications the way a presentation layer
//! would show them, and prints the final summary as JSON.
//!
//! Usage: `sub-rescue [tuning.json] [seed]`

use sub_rescue::Tuning;
use sub_rescue::platform::FrameLoop;
use sub_rescue::sim::{GameEvent, GamePhase, GameState, Outcome, TickInput, autopilot};

/// Give up after this many simulated frames (about an hour of play)
const MAX_FRAMES: u64 = 60 * 60 * 60;
const FRAME_SECS: f64 = 1.0 / 60.0;

fn load_tuning(path: &str) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}; using defaults", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning file {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::LevelStarted {
            level,
            speed_multiplier,
            mines,
            currents,
        } => log::info!(
            "== Level {} == speed {:.1}x, mines {}, currents {}",
            level,
            speed_multiplier,
            mines,
            currents
        ),
        GameEvent::DamageTaken { lives } => match lives {
            0 => log::info!("Hit! No lives left."),
            1 => log::info!("Hit! 1 life left."),
            n => log::info!("Hit! {} lives left.", n),
        },
        GameEvent::LevelComplete { result } => log::info!("{}", result),
        GameEvent::GameEnded { outcome, score, .. } => match outcome {
            Outcome::Victory => log::info!("Mission accomplished! Final score {}", score),
            Outcome::Defeat => log::info!("Game over. Final score {}", score),
        },
        other => log::debug!("{:?}", other),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mut tuning = args.next().map(|p| load_tuning(&p)).unwrap_or_default();
    if let Some(seed) = args.next() {
        match seed.parse() {
            Ok(seed) => tuning.seed = seed,
            Err(e) => log::warn!("Ignoring seed {:?}: {}", seed, e),
        }
    }

    log::info!("Sub Rescue (headless) starting...");

    let mut state = GameState::new(tuning);
    let mut frames = FrameLoop::new();
    let mut now = 0.0;

    state.start();
    frames.begin(now);

    for _ in 0..MAX_FRAMES {
        now += FRAME_SECS;
        let input = TickInput {
            axes: autopilot::steer(&state),
        };
        frames.frame(&mut state, &input, now);

        for event in state.drain_events() {
            report(&event);
        }

        match state.phase {
            GamePhase::LevelComplete => {
                state.advance_to_next_level();
                frames.begin(now);
            }
            GamePhase::Victory | GamePhase::Defeat => break,
            _ => {}
        }
    }

    if !state.phase.is_terminal() {
        log::warn!("Frame budget exhausted, ending the run");
        state.end_here();
        for event in state.drain_events() {
            report(&event);
        }
    }

    let summary = serde_json::json!({
        "snapshot": state.snapshot(),
        "levels": state.results,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("Could not render summary: {}", e),
    }
}

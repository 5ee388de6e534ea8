//! Fruit Catcher headless runner
//!
//! Plays one single-player round with a simple autopilot against the
//! recording frontend, then prints the result as JSON.
//!
//! Usage: `fruit-catcher [seed] [tuning.json] [settings.json]`

use fruit_catcher::consts::*;
use fruit_catcher::highscores::HighScoreEntry;
use fruit_catcher::platform::{KeySet, RecordingFrontend};
use fruit_catcher::sim::GameState;
use fruit_catcher::{Game, LifecyclePhase, Outcome, ScoreSnapshot, Settings, Tuning};
use serde::Serialize;

/// Give up after five minutes of game time
const MAX_FRAMES: u64 = FRAMES_PER_SECOND as u64 * 300;

#[derive(Serialize)]
struct Report {
    seed: u64,
    frames: u64,
    phase: LifecyclePhase,
    outcome: Option<Outcome>,
    scores: ScoreSnapshot,
    high_scores: Vec<HighScoreEntry>,
}

/// Steer player 1 under the lowest item worth catching
fn autopilot(state: &GameState) -> KeySet {
    let Some(player) = state.player(1) else {
        return KeySet::empty();
    };
    let half_item = state.tuning.item_size / 2.0;
    let target = state
        .items
        .iter()
        .filter(|item| !item.kind().is_hazard())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|item| item.pos.x + half_item);

    let Some(target) = target else {
        return KeySet::empty();
    };
    let dx = target - player.center_x(&state.tuning);
    if dx.abs() < CATCHER_SPEED {
        return KeySet::empty();
    }

    // Confusion swaps the keys, so press the other one
    let go_left = (dx < 0.0) != player.effects.confused();
    if go_left {
        KeySet::P1_LEFT
    } else {
        KeySet::P1_RIGHT
    }
}

/// Read an optional JSON file; a missing or unreadable file means defaults
fn read_json(path: Option<String>) -> Option<String> {
    path.and_then(|path| match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Could not read {path}: {e}");
            None
        }
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = Tuning::load_or_default(read_json(args.next()).as_deref());
    let settings = Settings::load_or_default(read_json(args.next()).as_deref());

    log::info!("Fruit Catcher (headless) starting with seed {seed}");

    let mut game = Game::with_config(seed, tuning, settings);
    let mut frontend = RecordingFrontend::new();
    frontend.press(KeySet::START_SINGLE);
    game.run_frame(&mut frontend);

    let mut frames = 1;
    while frames < MAX_FRAMES {
        frontend.advance(FRAME_MS);
        frontend.press(game.state().map(autopilot).unwrap_or_default());
        for text in frontend.texts() {
            log::trace!("frame {frames}: {text}");
        }
        frontend.take_calls();
        frames += 1;
        game.run_frame(&mut frontend);
        if game.is_game_over() {
            break;
        }
    }

    let report = Report {
        seed,
        frames,
        phase: game.phase(),
        outcome: game.outcome(),
        scores: game.score_snapshot(),
        high_scores: game.high_scores().entries().to_vec(),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize report: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library is driven by the embedding page
}

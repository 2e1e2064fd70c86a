//! Bubble Burst entry point
//!
//! Runs a headless demo round: a simple autoplayer aims and fires until the
//! round ends, then the result is folded into the JSON leaderboard.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use bubble_burst::consts::*;
use bubble_burst::highscores::{HighScoreEntry, JsonScoreStore, ScoreStore};
use bubble_burst::is_high_score;
use bubble_burst::sim::{GamePhase, GameState, InputEvent, apply_input, tick};

/// Hard cap so a pathological round cannot spin forever
const MAX_TICKS: u64 = 600 * 60;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    log::info!("Bubble Burst starting with seed {seed}");
    let mut state = GameState::new(seed);
    let mut aim_rng = state.rng_state.next_rng();

    while state.time_ticks < MAX_TICKS {
        if state.phase == GamePhase::Aiming {
            aim_somewhere(&mut state, &mut aim_rng);
            apply_input(&mut state, InputEvent::Launch);
        }
        tick(&mut state, SIM_DT);
        if let Some(outcome) = state.outcome() {
            log::info!(
                "Round over after {} ticks: {} with {} points",
                state.time_ticks,
                if outcome.won { "won" } else { "lost" },
                outcome.final_score
            );
            record_score(outcome.final_score);
            return;
        }
    }

    log::warn!("Round hit the tick cap; score so far {}", state.score);
}

/// Walk the shooter to a random column before firing
fn aim_somewhere<R: Rng>(state: &mut GameState, rng: &mut R) {
    let target = rng.random_range(SHOOTER_MIN_X..SHOOTER_MAX_X);
    for _ in 0..GRID_COLS * 2 {
        let event = if state.shooter.x < target - AIM_STEP {
            InputEvent::AimRight
        } else if state.shooter.x > target + AIM_STEP {
            InputEvent::AimLeft
        } else {
            break;
        };
        if !apply_input(state, event) {
            break;
        }
    }
}

/// Fold the finished round into the on-disk leaderboard
fn record_score(score: u64) {
    let mut store = JsonScoreStore::new("highscores.json");
    if !is_high_score(&store, score) {
        log::info!("Score {score} did not make the board");
        return;
    }
    let date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();
    store.insert(HighScoreEntry {
        name: "YOU".to_string(),
        score,
        date,
    });
    for (i, entry) in store.list().iter().enumerate() {
        println!("{:2}. {:<12} {}", i + 1, entry.name, entry.score);
    }
}

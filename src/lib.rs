//! Bubble Burst - a hex-grid bubble shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, flight, matching, pruning)
//! - `highscores`: Top-10 leaderboard behind an injected store
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreEntry, HighScores, ScoreStore, is_high_score};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bubble diameter; also the grid pitch in both axes
    pub const BUBBLE_SIZE: f32 = 40.0;
    pub const BUBBLE_RADIUS: f32 = BUBBLE_SIZE / 2.0;

    /// Grid width in columns (rows grow as needed)
    pub const GRID_COLS: usize = 15;
    /// Gap between the field edge and the cell (0, 0) circle
    pub const GRID_MARGIN: f32 = 20.0;

    /// Fixed shooter height; a falling projectile that reaches this line
    /// without touching anything ends the round
    pub const SHOOTER_Y: f32 = 550.0;
    /// Any placed bubble whose center reaches this y ends the round as a loss
    pub const LOSS_LINE_Y: f32 = 500.0;
    /// Horizontal travel limits for the shooter
    pub const SHOOTER_MIN_X: f32 = 50.0;
    pub const SHOOTER_MAX_X: f32 = 750.0;

    /// Upward launch speed (pixels per second)
    pub const LAUNCH_SPEED: f32 = 500.0;
    /// Shooter nudge per aim input (pixels)
    pub const AIM_STEP: f32 = 20.0;

    /// Minimum same-color cluster size that pops
    pub const MATCH_MIN: usize = 3;
    /// Score per bubble removed by a color match
    pub const MATCH_SCORE: u64 = 10;
    /// Score per bubble dropped by the ceiling connectivity pass
    pub const FLOATING_SCORE: u64 = 5;

    /// Rows pre-filled at round start (see `Tuning` to override)
    pub const DEFAULT_PREFILL_ROWS: usize = 5;
}

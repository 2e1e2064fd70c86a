//! Data-driven game balance
//!
//! Knobs a round can be started with. Everything here serializes, so presets
//! can live in JSON alongside the rest of the game data.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::PALETTE;

/// Row 12 sits past the loss line, so at most the first 12 rows may prefill
const MAX_PREFILL_ROWS: usize = 12;

/// Balance knobs for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Rows filled with random bubbles at round start
    pub prefill_rows: usize,
    /// How many palette entries are in play (prefix of the full palette)
    pub color_count: usize,
    /// Upward launch speed in pixels per second
    pub launch_speed: f32,
    /// Shooter nudge per aim input, pixels
    pub aim_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            prefill_rows: DEFAULT_PREFILL_ROWS,
            color_count: PALETTE.len(),
            launch_speed: LAUNCH_SPEED,
            aim_step: AIM_STEP,
        }
    }
}

impl Tuning {
    /// Clamp out-of-range knobs instead of failing a round start
    pub fn sanitized(self) -> Self {
        Self {
            prefill_rows: self.prefill_rows.min(MAX_PREFILL_ROWS),
            color_count: self.color_count.clamp(1, PALETTE.len()),
            launch_speed: self.launch_speed.max(1.0),
            aim_step: self.aim_step.max(1.0),
        }
    }
}

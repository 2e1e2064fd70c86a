//! Game state and core simulation types
//!
//! Everything needed to replay a round deterministically lives here.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{BubbleColor, Grid};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Shooter accepts aim/launch input; the loaded bubble sits at the muzzle
    Aiming,
    /// A bubble is in flight
    Flying,
    /// Collision detected; snap/match/prune run to completion within the tick
    Resolving,
    /// Round over; only Restart is accepted
    Ended { won: bool },
}

/// The player's shooter. Vertical position is fixed; only x moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shooter {
    pub x: f32,
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
        }
    }
}

impl Shooter {
    /// Where the loaded bubble rests, one diameter above the shooter line
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x, SHOOTER_Y - BUBBLE_SIZE)
    }
}

/// The loaded or in-flight bubble. At most one exists at a time; the phase
/// says which it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
}

/// RNG state wrapper for serialization
///
/// Each draw site takes a fresh `Pcg32` on its own stream, so replaying a
/// serialized state reproduces the same colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next draw site; advances the stream counter
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Final result exposed to the presentation layer once the round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub final_score: u64,
    pub won: bool,
}

/// A placed bubble as seen by the render sink
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub color: BubbleColor,
}

/// The in-flight (or loaded) bubble as seen by the render sink
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectileView {
    pub x: f32,
    pub y: f32,
    pub color: BubbleColor,
}

/// Everything the presentation layer needs to draw one frame. The core never
/// draws; it only hands out this data.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub cells: Vec<CellView>,
    pub projectile: Option<ProjectileView>,
    pub shooter_x: f32,
    pub score: u64,
    pub phase: GamePhase,
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Score (+10 per matched bubble, +5 per pruned bubble)
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Placed bubbles
    pub grid: Grid,
    /// Player shooter
    pub shooter: Shooter,
    /// Loaded or in-flight bubble
    pub projectile: Option<Projectile>,
    /// Balance knobs this round was started with
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new round: prefill the grid and load the first bubble
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Aiming,
            grid: Grid::new(),
            shooter: Shooter::default(),
            projectile: None,
            tuning,
        };

        let mut rng = state.rng_state.next_rng();
        state
            .grid
            .prefill(tuning.prefill_rows, tuning.color_count, &mut rng);
        state.load_projectile();

        state
    }

    /// Load a fresh random-colored bubble at the muzzle, velocity zero
    pub(crate) fn load_projectile(&mut self) {
        let mut rng = self.rng_state.next_rng();
        let color = BubbleColor::random(&mut rng, self.tuning.color_count);
        self.projectile = Some(Projectile {
            pos: self.shooter.muzzle(),
            vel: Vec2::ZERO,
            color,
        });
    }

    /// Draw a seed for the next round after a restart
    pub(crate) fn next_round_seed(&mut self) -> u64 {
        self.rng_state.next_rng().random()
    }

    /// Final score and win/loss flag, present once the round has ended
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            GamePhase::Ended { won } => Some(RoundOutcome {
                final_score: self.score,
                won,
            }),
            _ => None,
        }
    }

    /// Render-sink view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self
                .grid
                .occupied()
                .map(|(row, col, color)| {
                    let center = Grid::cell_center(row, col);
                    CellView {
                        row,
                        col,
                        x: center.x,
                        y: center.y,
                        color,
                    }
                })
                .collect(),
            projectile: self.projectile.map(|p| ProjectileView {
                x: p.pos.x,
                y: p.pos.y,
                color: p.color,
            }),
            shooter_x: self.shooter.x,
            score: self.score,
            phase: self.phase,
        }
    }
}

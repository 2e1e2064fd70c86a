//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod matcher;
pub mod state;
pub mod tick;

pub use grid::{BubbleColor, Grid, PALETTE};
pub use matcher::{ceiling_connected, floating_cells, same_color_cluster};
pub use state::{
    CellView, GamePhase, GameState, Projectile, ProjectileView, RngState, RoundOutcome, Shooter,
    Snapshot,
};
pub use tick::{InputEvent, apply_input, tick};

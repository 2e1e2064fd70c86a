//! Fixed timestep simulation tick
//!
//! Core loop that advances the round deterministically: flight motion each
//! tick, then snap -> match -> prune -> terminal checks run synchronously in
//! the tick that detected contact. Input arrives as discrete events that are
//! validated against the current phase.

use super::collision;
use super::grid::Grid;
use super::matcher;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Discrete input events delivered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    AimLeft,
    AimRight,
    Launch,
    Restart,
}

/// Apply one input event; returns whether it was accepted.
///
/// Ill-timed events (aiming or launching outside `Aiming`, nudging past the
/// travel limits) are rejected silently - user timing, not a fault.
pub fn apply_input(state: &mut GameState, event: InputEvent) -> bool {
    match event {
        InputEvent::AimLeft => nudge_shooter(state, -1.0),
        InputEvent::AimRight => nudge_shooter(state, 1.0),
        InputEvent::Launch => {
            if state.phase != GamePhase::Aiming {
                return false;
            }
            let Some(p) = state.projectile.as_mut() else {
                debug_assert!(false, "aiming phase without a loaded bubble");
                return false;
            };
            p.vel.x = 0.0;
            p.vel.y = -state.tuning.launch_speed;
            state.phase = GamePhase::Flying;
            true
        }
        InputEvent::Restart => {
            let seed = state.next_round_seed();
            *state = GameState::with_tuning(seed, state.tuning);
            true
        }
    }
}

/// Move the shooter (and the loaded bubble with it) one aim step
fn nudge_shooter(state: &mut GameState, dir: f32) -> bool {
    if state.phase != GamePhase::Aiming {
        return false;
    }
    // Mirror the travel gate: reject at the limit rather than clamping
    if dir < 0.0 && state.shooter.x <= SHOOTER_MIN_X {
        return false;
    }
    if dir > 0.0 && state.shooter.x >= SHOOTER_MAX_X {
        return false;
    }
    let step = dir * state.tuning.aim_step;
    state.shooter.x += step;
    if let Some(p) = state.projectile.as_mut() {
        p.pos.x += step;
    }
    true
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if matches!(state.phase, GamePhase::Ended { .. }) {
        return;
    }
    state.time_ticks += 1;

    // Loss line and cleared field are re-checked at the top of every tick;
    // either can hold independently of what the projectile is doing.
    if check_terminal(state) {
        return;
    }

    if state.phase == GamePhase::Flying {
        advance_flight(state, dt);
    }
}

/// Move the in-flight bubble and hand off to resolution on contact
fn advance_flight(state: &mut GameState, dt: f32) {
    let Some(p) = state.projectile.as_mut() else {
        debug_assert!(false, "flying phase without a projectile");
        state.phase = GamePhase::Aiming;
        return;
    };

    // Move first, then reflect the moved position off the side walls
    p.pos += p.vel * dt;
    collision::reflect_walls(&mut p.pos, &mut p.vel);

    if collision::hits_grid(&state.grid, p.pos) {
        // No further motion this tick; resolution completes before the next
        state.phase = GamePhase::Resolving;
        resolve(state);
        return;
    }

    // Fell back to the shooter line without touching anything
    if p.pos.y >= SHOOTER_Y {
        state.phase = GamePhase::Ended { won: false };
    }
}

/// Snap the projectile, pop matches, prune floaters, then either end the
/// round or load the next bubble
fn resolve(state: &mut GameState) {
    debug_assert_eq!(state.phase, GamePhase::Resolving);
    let Some(p) = state.projectile.take() else {
        debug_assert!(false, "resolving phase without a projectile");
        state.phase = GamePhase::Aiming;
        return;
    };

    let (row, col) = collision::snap_slot(&state.grid, p.pos);
    let placed = state.grid.place(row, col, p.color);
    debug_assert!(placed, "snap resolved to an occupied slot");

    let cluster = matcher::same_color_cluster(&state.grid, row, col);
    if cluster.len() >= MATCH_MIN {
        for &(r, c) in &cluster {
            state.grid.remove(r, c);
        }
        state.score += MATCH_SCORE * cluster.len() as u64;

        // Connectivity is only disturbed by a removal, so the prune pass
        // runs exactly when a match fired
        let floating = matcher::floating_cells(&state.grid);
        for &(r, c) in &floating {
            state.grid.remove(r, c);
        }
        state.score += FLOATING_SCORE * floating.len() as u64;
    }

    if check_terminal(state) {
        return;
    }

    state.load_projectile();
    state.phase = GamePhase::Aiming;
}

/// Check both terminal conditions; returns true if the round just ended
fn check_terminal(state: &mut GameState) -> bool {
    let lost = state
        .grid
        .occupied()
        .any(|(row, col, _)| Grid::cell_center(row, col).y >= LOSS_LINE_Y);
    if lost {
        state.phase = GamePhase::Ended { won: false };
        return true;
    }
    if state.grid.is_empty() {
        state.phase = GamePhase::Ended { won: true };
        return true;
    }
    false
}

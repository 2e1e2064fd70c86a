//! Connected-component searches over the grid
//!
//! Both passes use an explicit frontier stack with a visited set keyed by
//! (row, col), so traversal cost is bounded by the occupied-cell count and
//! no call stack grows with the grid.

use std::collections::HashSet;

use super::grid::Grid;
use crate::consts::GRID_COLS;

/// Same-color region reachable from the origin slot, origin included
///
/// Returns an empty set if the origin slot is unoccupied. Order follows
/// traversal discovery; callers that need stable order should sort.
pub fn same_color_cluster(grid: &Grid, row: usize, col: usize) -> Vec<(usize, usize)> {
    let Some(color) = grid.get(row, col) else {
        return Vec::new();
    };

    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut cluster = Vec::new();
    let mut frontier = vec![(row, col)];

    while let Some((r, c)) = frontier.pop() {
        if !visited.insert((r, c)) {
            continue;
        }
        // Off-color cells terminate the expansion at this slot
        if grid.get(r, c) != Some(color) {
            continue;
        }
        cluster.push((r, c));
        for (nr, nc, _) in grid.neighbors(r, c) {
            if !visited.contains(&(nr, nc)) {
                frontier.push((nr, nc));
            }
        }
    }

    cluster
}

/// Slots reachable from any occupied ceiling (row 0) cell
///
/// Recomputed from scratch on every call; never reuses earlier passes.
pub fn ceiling_connected(grid: &Grid) -> HashSet<(usize, usize)> {
    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut frontier: Vec<(usize, usize)> = (0..GRID_COLS)
        .filter(|&col| grid.is_occupied(0, col))
        .map(|col| (0, col))
        .collect();

    while let Some((r, c)) = frontier.pop() {
        if !visited.insert((r, c)) {
            continue;
        }
        for (nr, nc, _) in grid.neighbors(r, c) {
            if !visited.contains(&(nr, nc)) {
                frontier.push((nr, nc));
            }
        }
    }

    visited
}

/// Occupied slots with no path back to the ceiling, in row-major order
pub fn floating_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let connected = ceiling_connected(grid);
    grid.occupied()
        .map(|(r, c, _)| (r, c))
        .filter(|slot| !connected.contains(slot))
        .collect()
}

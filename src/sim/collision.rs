//! Projectile contact detection and snap-to-grid resolution
//!
//! Flight uses continuous (x, y) positions; placement is discrete (row, col).
//! The snap step is a geometric hash from the impact position to the nearest
//! slot, not a physics-accurate contact solve.

use glam::Vec2;

use super::grid::Grid;
use crate::consts::*;

/// Reflect the projectile off the side walls, clamping it into the field.
/// Returns true if a bounce happened this step.
pub fn reflect_walls(pos: &mut Vec2, vel: &mut Vec2) -> bool {
    if pos.x <= BUBBLE_RADIUS {
        pos.x = BUBBLE_RADIUS;
        vel.x = -vel.x;
        true
    } else if pos.x >= FIELD_WIDTH - BUBBLE_RADIUS {
        pos.x = FIELD_WIDTH - BUBBLE_RADIUS;
        vel.x = -vel.x;
        true
    } else {
        false
    }
}

/// True when an in-flight bubble at `pos` has hit the ceiling or come within
/// one diameter of any placed bubble
pub fn hits_grid(grid: &Grid, pos: Vec2) -> bool {
    if pos.y <= BUBBLE_RADIUS {
        return true;
    }
    grid.occupied()
        .any(|(row, col, _)| pos.distance(Grid::cell_center(row, col)) < BUBBLE_SIZE)
}

/// Nearest slot to an impact position, before conflict resolution
pub fn candidate_slot(pos: Vec2) -> (usize, usize) {
    let row = ((pos.y - GRID_MARGIN - BUBBLE_RADIUS) / BUBBLE_SIZE)
        .round()
        .max(0.0) as usize;
    let col = ((pos.x - GRID_MARGIN - BUBBLE_RADIUS - Grid::row_offset(row)) / BUBBLE_SIZE)
        .round()
        .clamp(0.0, (GRID_COLS - 1) as f32) as usize;
    (row, col)
}

/// Resolve an impact position to a free slot
///
/// Conflict policy, in order:
/// 1. the candidate slot itself, if free;
/// 2. walking upward in the candidate column (the shot stacks onto the pile);
/// 3. the free slot nearest the impact point among rows 0..=candidate
///    (squared distance, ties broken by ascending (row, col)) - this covers
///    the degenerate case of a column solid up to the ceiling without ever
///    overwriting an occupied slot;
/// 4. walking downward in the candidate column; the grid grows rows on
///    demand, so this always terminates.
pub fn snap_slot(grid: &Grid, pos: Vec2) -> (usize, usize) {
    let (row, col) = candidate_slot(pos);
    if !grid.is_occupied(row, col) {
        return (row, col);
    }

    let mut r = row;
    while r > 0 {
        r -= 1;
        if !grid.is_occupied(r, col) {
            return (r, col);
        }
    }

    let mut best: Option<(f32, usize, usize)> = None;
    for r in 0..=row {
        for c in 0..GRID_COLS {
            if grid.is_occupied(r, c) {
                continue;
            }
            let d = pos.distance_squared(Grid::cell_center(r, c));
            let better = match best {
                Some((bd, br, bc)) => d < bd || (d == bd && (r, c) < (br, bc)),
                None => true,
            };
            if better {
                best = Some((d, r, c));
            }
        }
    }
    if let Some((_, r, c)) = best {
        return (r, c);
    }

    let mut r = row + 1;
    while grid.is_occupied(r, col) {
        r += 1;
    }
    (r, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::BubbleColor;

    #[test]
    fn test_reflect_left_wall() {
        let mut pos = Vec2::new(18.0, 300.0);
        let mut vel = Vec2::new(-120.0, -500.0);
        assert!(reflect_walls(&mut pos, &mut vel));
        assert_eq!(pos.x, BUBBLE_RADIUS);
        assert_eq!(vel, Vec2::new(120.0, -500.0));
    }

    #[test]
    fn test_reflect_right_wall() {
        let mut pos = Vec2::new(790.0, 300.0);
        let mut vel = Vec2::new(80.0, -500.0);
        assert!(reflect_walls(&mut pos, &mut vel));
        assert_eq!(pos.x, FIELD_WIDTH - BUBBLE_RADIUS);
        assert_eq!(vel.x, -80.0);
    }

    #[test]
    fn test_no_reflect_mid_field() {
        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(0.0, -500.0);
        assert!(!reflect_walls(&mut pos, &mut vel));
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_hits_ceiling() {
        let grid = Grid::new();
        assert!(hits_grid(&grid, Vec2::new(400.0, BUBBLE_RADIUS)));
        assert!(!hits_grid(&grid, Vec2::new(400.0, BUBBLE_RADIUS + 1.0)));
    }

    #[test]
    fn test_hits_on_proximity() {
        let mut grid = Grid::new();
        grid.place(0, 0, BubbleColor::Green);
        let center = Grid::cell_center(0, 0);
        // One pixel inside a diameter: contact
        assert!(hits_grid(&grid, center + Vec2::new(0.0, BUBBLE_SIZE - 1.0)));
        // One pixel outside: still flying
        assert!(!hits_grid(&grid, center + Vec2::new(0.0, BUBBLE_SIZE + 1.0)));
    }

    #[test]
    fn test_candidate_maps_cell_centers_back() {
        for &(row, col) in &[(0, 0), (1, 0), (2, 3), (5, 14), (7, 7)] {
            assert_eq!(candidate_slot(Grid::cell_center(row, col)), (row, col));
        }
    }

    #[test]
    fn test_candidate_clamps_to_field() {
        // Above the margin rounds to row 0, far right clamps to the last column
        assert_eq!(candidate_slot(Vec2::new(790.0, 20.0)), (0, GRID_COLS - 1));
    }

    #[test]
    fn test_snap_takes_free_candidate() {
        let grid = Grid::new();
        assert_eq!(snap_slot(&grid, Grid::cell_center(2, 3)), (2, 3));
    }

    #[test]
    fn test_snap_walks_up_on_conflict() {
        let mut grid = Grid::new();
        grid.place(2, 3, BubbleColor::Green);
        assert_eq!(snap_slot(&grid, Grid::cell_center(2, 3)), (1, 3));

        grid.place(1, 3, BubbleColor::Sky);
        assert_eq!(snap_slot(&grid, Grid::cell_center(2, 3)), (0, 3));
    }

    #[test]
    fn test_snap_full_column_picks_nearest_free() {
        let mut grid = Grid::new();
        for row in 0..=2 {
            grid.place(row, 3, BubbleColor::Green);
        }
        // Column 3 is solid up to the ceiling; the nearest free slots are the
        // two beside the impact, and the tie breaks toward the lower column.
        assert_eq!(snap_slot(&grid, Grid::cell_center(2, 3)), (2, 2));
    }

    #[test]
    fn test_snap_never_overwrites() {
        let mut grid = Grid::new();
        for row in 0..3 {
            for col in 0..GRID_COLS {
                grid.place(row, col, BubbleColor::Green);
            }
        }
        // Everything at and above the candidate is occupied; resolution grows
        // the grid downward instead of replacing a bubble.
        let slot = snap_slot(&grid, Grid::cell_center(2, 7));
        assert_eq!(slot, (3, 7));
        assert!(!grid.is_occupied(slot.0, slot.1));
    }
}

//! Hex-offset bubble grid: storage, adjacency, occupancy
//!
//! Rows are laid out pointy-top style: odd rows shift right by half a cell,
//! which gives every cell up to six neighbors. The grid is a fixed number of
//! columns wide and grows rows downward on demand.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Bubble palette (values mirror the classic neon set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Green,
    Sky,
    Violet,
    Plum,
    Magenta,
    Crimson,
    Amber,
    Ember,
    Lime,
    Turquoise,
    Mint,
    Rose,
}

/// All palette entries, in draw order
pub const PALETTE: [BubbleColor; 12] = [
    BubbleColor::Green,
    BubbleColor::Sky,
    BubbleColor::Violet,
    BubbleColor::Plum,
    BubbleColor::Magenta,
    BubbleColor::Crimson,
    BubbleColor::Amber,
    BubbleColor::Ember,
    BubbleColor::Lime,
    BubbleColor::Turquoise,
    BubbleColor::Mint,
    BubbleColor::Rose,
];

impl BubbleColor {
    /// 0xRRGGBB value for presentation layers
    pub fn rgb(self) -> u32 {
        match self {
            BubbleColor::Green => 0x16de67,
            BubbleColor::Sky => 0x16adde,
            BubbleColor::Violet => 0x7513be,
            BubbleColor::Plum => 0x5d0948,
            BubbleColor::Magenta => 0xbe13a2,
            BubbleColor::Crimson => 0xde1652,
            BubbleColor::Amber => 0xed9f4f,
            BubbleColor::Ember => 0xff4500,
            BubbleColor::Lime => 0xd0ed4f,
            BubbleColor::Turquoise => 0x40e0d0,
            BubbleColor::Mint => 0x2fead7,
            BubbleColor::Rose => 0xf7b0cd,
        }
    }

    /// Draw a uniform color from the first `palette_size` palette entries
    pub fn random<R: Rng>(rng: &mut R, palette_size: usize) -> Self {
        let size = palette_size.clamp(1, PALETTE.len());
        PALETTE[rng.random_range(0..size)]
    }
}

/// Neighbor offsets (row delta, col delta) for cells on even rows
const EVEN_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
/// Neighbor offsets for cells on odd rows (shifted right by half a cell)
const ODD_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Sparse bubble storage indexed by (row, col)
///
/// Invariants: at most one bubble per slot, `col < GRID_COLS`, rows grow
/// downward as placements need them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<BubbleColor>>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal parity shift for a row (odd rows sit half a cell right)
    #[inline]
    pub fn row_offset(row: usize) -> f32 {
        if row % 2 == 0 { 0.0 } else { BUBBLE_RADIUS }
    }

    /// Canonical center position for a slot
    #[inline]
    pub fn cell_center(row: usize, col: usize) -> Vec2 {
        Vec2::new(
            GRID_MARGIN + BUBBLE_RADIUS + col as f32 * BUBBLE_SIZE + Self::row_offset(row),
            GRID_MARGIN + BUBBLE_RADIUS + row as f32 * BUBBLE_SIZE,
        )
    }

    /// Number of rows currently allocated (trailing rows may be empty)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<BubbleColor> {
        self.rows.get(row)?.get(col).copied().flatten()
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Insert a bubble; returns false (and leaves the grid untouched) if the
    /// slot is already occupied. Callers resolve conflicts before placing.
    pub fn place(&mut self, row: usize, col: usize, color: BubbleColor) -> bool {
        debug_assert!(col < GRID_COLS, "column {col} out of range");
        if col >= GRID_COLS || self.is_occupied(row, col) {
            return false;
        }
        while self.rows.len() <= row {
            self.rows.push(vec![None; GRID_COLS]);
        }
        self.rows[row][col] = Some(color);
        true
    }

    /// Clear a slot, returning the bubble that was there
    pub fn remove(&mut self, row: usize, col: usize) -> Option<BubbleColor> {
        self.rows.get_mut(row)?.get_mut(col)?.take()
    }

    /// True when no bubble remains anywhere (the win condition)
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|c| c.is_none()))
    }

    /// All occupied slots in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, BubbleColor)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, c)| c.map(|color| (row, col, color)))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Occupied cells among the six parity-dependent neighbor slots
    ///
    /// Out-of-range and empty slots are silently skipped; the result order
    /// follows the offset table.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize, BubbleColor)> {
        let offsets = if row % 2 == 0 {
            &EVEN_ROW_NEIGHBORS
        } else {
            &ODD_ROW_NEIGHBORS
        };

        let mut found = Vec::with_capacity(6);
        for &(dr, dc) in offsets {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr < 0 || nc < 0 || nc >= GRID_COLS as i32 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if let Some(color) = self.get(nr, nc) {
                found.push((nr, nc, color));
            }
        }
        found
    }

    /// Fill the top `rows` rows with random colors from the palette prefix
    pub fn prefill<R: Rng>(&mut self, rows: usize, palette_size: usize, rng: &mut R) {
        for row in 0..rows {
            for col in 0..GRID_COLS {
                let color = BubbleColor::random(rng, palette_size);
                self.place(row, col, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cell_center_parity_offset() {
        // Even rows start flush with the margin, odd rows shift half a cell
        let even = Grid::cell_center(0, 0);
        assert_eq!(even, Vec2::new(40.0, 40.0));
        let odd = Grid::cell_center(1, 0);
        assert_eq!(odd, Vec2::new(60.0, 80.0));
        let far = Grid::cell_center(2, 3);
        assert_eq!(far, Vec2::new(160.0, 120.0));
    }

    fn full_grid(rows: usize) -> Grid {
        let mut grid = Grid::new();
        for row in 0..rows {
            for col in 0..GRID_COLS {
                assert!(grid.place(row, col, BubbleColor::Green));
            }
        }
        grid
    }

    #[test]
    fn test_neighbors_even_row() {
        let grid = full_grid(4);
        let mut coords: Vec<_> = grid.neighbors(2, 5).iter().map(|&(r, c, _)| (r, c)).collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(1, 4), (1, 5), (2, 4), (2, 6), (3, 4), (3, 5)]);
    }

    #[test]
    fn test_neighbors_odd_row() {
        let grid = full_grid(3);
        let mut coords: Vec<_> = grid.neighbors(1, 5).iter().map(|&(r, c, _)| (r, c)).collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(0, 5), (0, 6), (1, 4), (1, 6), (2, 5), (2, 6)]);
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let grid = full_grid(2);
        // Top-left corner: up-row offsets fall outside and are skipped
        let mut coords: Vec<_> = grid.neighbors(0, 0).iter().map(|&(r, c, _)| (r, c)).collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(0, 1), (1, 0)]);

        // Last column on an odd row: (dr, +1) offsets clip
        let mut coords: Vec<_> = grid
            .neighbors(1, GRID_COLS - 1)
            .iter()
            .map(|&(r, c, _)| (r, c))
            .collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(0, GRID_COLS - 1), (1, GRID_COLS - 2)]);
    }

    #[test]
    fn test_neighbors_skip_unoccupied() {
        let mut grid = Grid::new();
        grid.place(0, 4, BubbleColor::Sky);
        grid.place(0, 6, BubbleColor::Rose);
        // (0, 5) is empty; its only occupied neighbors are the two beside it
        let mut coords: Vec<_> = grid.neighbors(0, 5).iter().map(|&(r, c, _)| (r, c)).collect();
        coords.sort_unstable();
        assert_eq!(coords, vec![(0, 4), (0, 6)]);
    }

    #[test]
    fn test_place_remove_roundtrip() {
        let mut grid = Grid::new();
        assert!(grid.place(3, 7, BubbleColor::Amber));
        assert!(grid.is_occupied(3, 7));
        // Second placement on the same slot is a rejected no-op
        assert!(!grid.place(3, 7, BubbleColor::Lime));
        assert_eq!(grid.get(3, 7), Some(BubbleColor::Amber));

        assert_eq!(grid.remove(3, 7), Some(BubbleColor::Amber));
        assert!(!grid.is_occupied(3, 7));
        assert_eq!(grid.remove(3, 7), None);
    }

    #[test]
    fn test_place_grows_rows() {
        let mut grid = Grid::new();
        assert_eq!(grid.row_count(), 0);
        assert!(grid.place(4, 0, BubbleColor::Mint));
        assert_eq!(grid.row_count(), 5);
        assert!(!grid.is_occupied(2, 0));
    }

    #[test]
    fn test_prefill_fills_exactly_n_rows() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut grid = Grid::new();
        grid.prefill(5, PALETTE.len(), &mut rng);
        assert_eq!(grid.occupied_count(), 5 * GRID_COLS);
        for col in 0..GRID_COLS {
            assert!(grid.is_occupied(4, col));
            assert!(!grid.is_occupied(5, col));
        }
    }

    #[test]
    fn test_prefill_respects_palette_prefix() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut grid = Grid::new();
        grid.prefill(3, 2, &mut rng);
        for (_, _, color) in grid.occupied() {
            assert!(color == BubbleColor::Green || color == BubbleColor::Sky);
        }
    }

    #[test]
    fn test_is_empty() {
        let mut grid = Grid::new();
        assert!(grid.is_empty());
        grid.place(0, 0, BubbleColor::Green);
        assert!(!grid.is_empty());
        grid.remove(0, 0);
        // Rows stay allocated but the grid counts as empty
        assert!(grid.is_empty());
    }
}

//! Grid dimensions, occupancy bitmap and world-space mapping.

use crate::state::{Cell, WorldPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as u32) < self.width
            && (cell.row as u32) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Affine transform between grid cells and presentation coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldMapping {
    pub origin: WorldPoint,
    pub tile_size: f32,
}

impl WorldMapping {
    pub const fn new(origin: WorldPoint, tile_size: f32) -> Self {
        Self { origin, tile_size }
    }
}

impl Default for WorldMapping {
    fn default() -> Self {
        Self::new(WorldPoint::new(0.0, 0.0), 64.0)
    }
}

/// Occupancy index for a fixed-size grid.
///
/// Tracks only whether something physically stands on a cell; it has no
/// notion of which unit that is.
#[derive(Clone, Debug, PartialEq)]
pub struct GridIndex {
    dimensions: GridDimensions,
    mapping: WorldMapping,
    blocked: Vec<bool>,
}

impl GridIndex {
    pub fn new(dimensions: GridDimensions, mapping: WorldMapping) -> Self {
        Self {
            dimensions,
            mapping,
            blocked: vec![false; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn mapping(&self) -> WorldMapping {
        self.mapping
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell)
    }

    /// Marks or clears a cell.
    ///
    /// Out-of-range cells trip a debug assertion and are ignored in release
    /// builds.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        debug_assert!(
            self.in_bounds(cell),
            "set_blocked on out-of-bounds cell {cell}"
        );
        if let Some(index) = self.index(cell) {
            self.blocked[index] = blocked;
        }
    }

    /// Returns false for out-of-bounds cells; check [`Self::in_bounds`] separately.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|index| self.blocked[index])
    }

    /// In bounds and not blocked.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    /// Center of `cell` in world space.
    pub fn to_world(&self, cell: Cell) -> WorldPoint {
        let tile = self.mapping.tile_size;
        WorldPoint::new(
            self.mapping.origin.x + cell.col as f32 * tile + tile / 2.0,
            self.mapping.origin.y + cell.row as f32 * tile + tile / 2.0,
        )
    }

    /// Cell under a world-space point, if it falls on the grid.
    pub fn to_cell(&self, point: WorldPoint) -> Option<Cell> {
        let tile = self.mapping.tile_size;
        if tile <= 0.0 {
            return None;
        }

        let col = ((point.x - self.mapping.origin.x) / tile).floor();
        let row = ((point.y - self.mapping.origin.y) / tile).floor();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }

        let cell = Cell::new(col as i32, row as i32);
        self.in_bounds(cell).then_some(cell)
    }

    /// Blocked cells in row-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.dimensions.width as usize;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(move |(index, _)| Cell::new((index % width) as i32, (index / width) as i32))
    }

    /// Runs `query` with `cell` temporarily released, restoring its previous
    /// state afterwards.
    ///
    /// Used to let a unit plan from its own cell without the planner knowing
    /// about units.
    pub fn with_released<R>(&mut self, cell: Cell, query: impl FnOnce(&GridIndex) -> R) -> R {
        let was_blocked = self.is_blocked(cell);
        if was_blocked {
            self.set_blocked(cell, false);
        }
        let result = query(self);
        if was_blocked {
            self.set_blocked(cell, true);
        }
        result
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let width = self.dimensions.width as usize;
        Some(cell.row as usize * width + cell.col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridIndex {
        GridIndex::new(
            GridDimensions::new(12, 8),
            WorldMapping::new(WorldPoint::new(100.0, 50.0), 64.0),
        )
    }

    #[test]
    fn bounds_cover_width_and_height() {
        let grid = grid();
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(11, 7)));
        assert!(!grid.in_bounds(Cell::new(12, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 8)));
        assert!(!grid.in_bounds(Cell::new(-1, 3)));
    }

    #[test]
    fn blocked_state_toggles_and_ignores_out_of_bounds_reads() {
        let mut grid = grid();
        grid.set_blocked(Cell::new(4, 4), true);
        assert!(grid.is_blocked(Cell::new(4, 4)));
        assert!(!grid.is_blocked(Cell::new(20, 20)));

        grid.set_blocked(Cell::new(4, 4), false);
        assert!(!grid.is_blocked(Cell::new(4, 4)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out-of-bounds")]
    fn set_blocked_out_of_range_fails_loudly_in_debug() {
        let mut grid = grid();
        grid.set_blocked(Cell::new(-1, 0), true);
    }

    #[test]
    fn world_mapping_round_trips_through_tile_centers() {
        let grid = grid();
        let cell = Cell::new(3, 2);
        let point = grid.to_world(cell);

        assert_eq!(point, WorldPoint::new(100.0 + 3.0 * 64.0 + 32.0, 50.0 + 2.0 * 64.0 + 32.0));
        assert_eq!(grid.to_cell(point), Some(cell));
        // Any point inside the tile maps back to the same cell.
        assert_eq!(grid.to_cell(WorldPoint::new(100.0 + 3.0 * 64.0, 50.0 + 2.0 * 64.0)), Some(cell));
    }

    #[test]
    fn to_cell_rejects_points_off_the_grid() {
        let grid = grid();
        assert_eq!(grid.to_cell(WorldPoint::new(99.0, 60.0)), None);
        assert_eq!(grid.to_cell(WorldPoint::new(100.0 + 12.0 * 64.0, 60.0)), None);
    }

    #[test]
    fn with_released_restores_previous_state() {
        let mut grid = grid();
        let cell = Cell::new(1, 1);
        grid.set_blocked(cell, true);

        let seen = grid.with_released(cell, |g| g.is_blocked(cell));
        assert!(!seen);
        assert!(grid.is_blocked(cell));
    }

    #[test]
    fn blocked_cells_are_listed_row_major() {
        let mut grid = grid();
        grid.set_blocked(Cell::new(5, 1), true);
        grid.set_blocked(Cell::new(2, 0), true);

        let cells: Vec<_> = grid.blocked_cells().collect();
        assert_eq!(cells, vec![Cell::new(2, 0), Cell::new(5, 1)]);
    }
}

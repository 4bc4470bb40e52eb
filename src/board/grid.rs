//! The square board and its tile arena.
//!
//! ## Layout
//!
//! Cells are stored column-first (`index = x * size + y`) in an
//! `im::Vector`, so cloning a grid for a render snapshot shares structure
//! instead of copying every cell. Each cell holds an optional [`TileId`];
//! the tiles themselves live in an arena keyed by id.
//!
//! ## Detached tiles
//!
//! A merge takes two tiles off the board but both stay in the arena until
//! the next [`Grid::prune_detached`], because the merged tile's
//! `merged_from` still names them.
//!
//! ## Contract
//!
//! `cell_content` and `random_available_cell` report misuse as
//! [`GridError`]. The mutation primitives (`insert_tile`, `move_tile`)
//! treat an out-of-bounds target as a caller bug and panic.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::snapshot::{GridSnapshot, SnapshotError};
use super::tile::{Tile, TileId};
use crate::core::{Position, RandomSource, MAX_SIZE};

/// Grid query on an invalid domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("no empty cell available")]
    NoAvailableCell,
}

/// A `size x size` board.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vector<Option<TileId>>,
    tiles: FxHashMap<TileId, Tile>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or above [`MAX_SIZE`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Grid size must be positive");
        assert!(size <= MAX_SIZE, "Grid size {size} exceeds {MAX_SIZE}");

        Self {
            size,
            cells: std::iter::repeat(None).take(size * size).collect(),
            tiles: FxHashMap::default(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.within_bounds(pos) {
            Some(pos.x as usize * self.size + pos.y as usize)
        } else {
            None
        }
    }

    fn expect_index(&self, pos: Position) -> usize {
        match self.index(pos) {
            Some(index) => index,
            None => panic!("position {pos} is outside a {0}x{0} grid", self.size),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn within_bounds(&self, pos: Position) -> bool {
        let size = self.size as i64;
        (0..size).contains(&i64::from(pos.x)) && (0..size).contains(&i64::from(pos.y))
    }

    /// The tile occupying `pos`, if any.
    pub fn cell_content(&self, pos: Position) -> Result<Option<&Tile>, GridError> {
        let index = self.index(pos).ok_or(GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            size: self.size,
        })?;
        Ok(self.cells[index].and_then(|id| self.tiles.get(&id)))
    }

    /// True when `pos` is on the board and empty.
    #[must_use]
    pub fn cell_available(&self, pos: Position) -> bool {
        matches!(self.index(pos), Some(index) if self.cells[index].is_none())
    }

    /// True when any cell is empty.
    #[must_use]
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// All empty cells, in [`Grid::each_cell`] order.
    #[must_use]
    pub fn available_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        self.each_cell(|pos, tile| {
            if tile.is_none() {
                cells.push(pos);
            }
        });
        cells
    }

    /// Pick an empty cell uniformly using one draw from `rng`.
    pub fn random_available_cell<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Position, GridError> {
        let cells = self.available_cells();
        let index = rng
            .next_index(cells.len())
            .ok_or(GridError::NoAvailableCell)?;
        Ok(cells[index])
    }

    /// Visit every cell, x outer and y inner.
    pub fn each_cell(&self, mut visit: impl FnMut(Position, Option<&Tile>)) {
        for x in 0..self.size {
            for y in 0..self.size {
                let id = self.cells[x * self.size + y];
                visit(
                    Position::new(x as i32, y as i32),
                    id.and_then(|id| self.tiles.get(&id)),
                );
            }
        }
    }

    /// Tiles currently on the board, in [`Grid::each_cell`] order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells
            .iter()
            .filter_map(move |id| id.and_then(|id| self.tiles.get(&id)))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    // === Arena ===

    /// Look up any tile in the arena, including detached ones.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    /// Allocate a fresh tile id.
    pub fn alloc_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Convenience: allocate an id and build a tile with it.
    pub fn new_tile(&mut self, position: Position, value: u32) -> Tile {
        let id = self.alloc_tile_id();
        Tile::new(id, position, value)
    }

    /// Drop arena entries that are no longer on the board.
    pub fn prune_detached(&mut self) {
        let on_board: FxHashSet<TileId> = self.cells.iter().filter_map(|cell| *cell).collect();
        self.tiles.retain(|id, _| on_board.contains(id));
    }

    /// Ids of the tiles currently on the board, in [`Grid::each_cell`] order.
    #[must_use]
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.cells.iter().filter_map(|cell| *cell).collect()
    }

    // === Mutation ===

    /// Place `tile` at its own coordinates, replacing any occupant.
    ///
    /// # Panics
    ///
    /// Panics if the tile's coordinates are outside the grid.
    pub fn insert_tile(&mut self, tile: Tile) -> TileId {
        let index = self.expect_index(tile.position());
        let id = tile.id;
        self.cells.set(index, Some(id));
        self.tiles.insert(id, tile);
        id
    }

    /// Clear the cell at the tile's current coordinates.
    ///
    /// The tile stays in the arena. Nothing happens if the tile is unknown or
    /// its cell is held by another tile.
    pub fn remove_tile(&mut self, id: TileId) {
        let Some(pos) = self.tiles.get(&id).map(Tile::position) else {
            return;
        };
        if let Some(index) = self.index(pos) {
            if self.cells[index] == Some(id) {
                self.cells.set(index, None);
            }
        }
    }

    /// Move a tile to `pos`, clearing its old cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn move_tile(&mut self, id: TileId, pos: Position) {
        let target = self.expect_index(pos);
        self.remove_tile(id);
        self.cells.set(target, Some(id));
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.update_position(pos);
        }
    }

    // === Serialization ===

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let mut snapshot = GridSnapshot::empty(self.size);
        self.each_cell(|pos, tile| {
            snapshot.cells[pos.x as usize][pos.y as usize] = tile.map(Tile::snapshot);
        });
        snapshot
    }

    /// Rebuild a grid from a snapshot, allocating fresh tile ids.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, SnapshotError> {
        let size = snapshot.size;
        if size == 0 {
            return Err(SnapshotError::ZeroSize);
        }
        if size > MAX_SIZE {
            return Err(SnapshotError::SizeTooLarge { size, max: MAX_SIZE });
        }
        if snapshot.cells.len() != size {
            return Err(SnapshotError::ColumnCount {
                expected: size,
                found: snapshot.cells.len(),
            });
        }

        let mut grid = Self::new(size);
        for (x, column) in snapshot.cells.iter().enumerate() {
            if column.len() != size {
                return Err(SnapshotError::RowLength {
                    column: x,
                    expected: size,
                    found: column.len(),
                });
            }
            for (y, cell) in column.iter().enumerate() {
                let Some(saved) = cell else { continue };
                if i64::from(saved.x) != x as i64 || i64::from(saved.y) != y as i64 {
                    return Err(SnapshotError::TileMisplaced {
                        x,
                        y,
                        tile_x: saved.x,
                        tile_y: saved.y,
                    });
                }
                if saved.value == 0 {
                    return Err(SnapshotError::ZeroValue { x, y });
                }
                let tile = grid.new_tile(Position::new(saved.x, saved.y), saved.value);
                grid.insert_tile(tile);
            }
        }
        Ok(grid)
    }
}

impl std::fmt::Display for Grid {
    /// One text row per board row, `.` for empty cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match self.cells[x * self.size + y].and_then(|id| self.tiles.get(&id)) {
                    Some(tile) => write!(f, "{:>3}", tile.value)?,
                    None => f.write_str("  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::snapshot::TileSnapshot;
    use crate::core::ScriptedRng;

    fn place(grid: &mut Grid, x: i32, y: i32, value: u32) -> TileId {
        let tile = grid.new_tile(Position::new(x, y), value);
        grid.insert_tile(tile)
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.tile_count(), 0);
        assert!(grid.cells_available());
        assert_eq!(grid.available_cells().len(), 16);
    }

    #[test]
    #[should_panic(expected = "Grid size must be positive")]
    fn test_zero_size_panics() {
        let _ = Grid::new(0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "exceeds")]
    fn test_oversized_grid_panics() {
        let _ = Grid::new(MAX_SIZE + 1);
    }

    #[test]
    fn test_within_bounds() {
        let grid = Grid::new(3);
        assert!(grid.within_bounds(Position::new(0, 0)));
        assert!(grid.within_bounds(Position::new(2, 2)));
        assert!(!grid.within_bounds(Position::new(3, 0)));
        assert!(!grid.within_bounds(Position::new(0, -1)));
        assert!(!grid.within_bounds(Position::new(-1, 2)));
    }

    #[test]
    fn test_cell_content_out_of_bounds() {
        let grid = Grid::new(4);
        assert_eq!(
            grid.cell_content(Position::new(4, 0)),
            Err(GridError::OutOfBounds { x: 4, y: 0, size: 4 })
        );
        assert_eq!(grid.cell_content(Position::new(1, 1)), Ok(None));
    }

    #[test]
    fn test_insert_and_query() {
        let mut grid = Grid::new(4);
        let id = place(&mut grid, 1, 2, 8);

        let tile = grid.cell_content(Position::new(1, 2)).unwrap().unwrap();
        assert_eq!(tile.id, id);
        assert_eq!(tile.value, 8);
        assert!(!grid.cell_available(Position::new(1, 2)));
        assert!(grid.cell_available(Position::new(2, 1)));
        assert!(!grid.cell_available(Position::new(9, 9)));
    }

    #[test]
    fn test_insert_overwrites_occupant() {
        let mut grid = Grid::new(2);
        place(&mut grid, 0, 0, 2);
        let second = place(&mut grid, 0, 0, 4);

        let tile = grid.cell_content(Position::new(0, 0)).unwrap().unwrap();
        assert_eq!(tile.id, second);
        assert_eq!(grid.tile_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_insert_out_of_bounds_panics() {
        let mut grid = Grid::new(2);
        let tile = grid.new_tile(Position::new(2, 0), 2);
        grid.insert_tile(tile);
    }

    #[test]
    fn test_remove_keeps_arena_entry() {
        let mut grid = Grid::new(2);
        let id = place(&mut grid, 1, 1, 2);

        grid.remove_tile(id);
        assert_eq!(grid.cell_content(Position::new(1, 1)), Ok(None));
        assert!(grid.tile(id).is_some());

        grid.prune_detached();
        assert!(grid.tile(id).is_none());
    }

    #[test]
    fn test_remove_ignores_foreign_cell() {
        let mut grid = Grid::new(2);
        let first = place(&mut grid, 0, 0, 2);
        let second = place(&mut grid, 0, 0, 4);

        // `first` still claims (0, 0) but no longer owns it
        grid.remove_tile(first);
        assert_eq!(
            grid.cell_content(Position::new(0, 0)).unwrap().map(|t| t.id),
            Some(second)
        );
    }

    #[test]
    fn test_move_tile() {
        let mut grid = Grid::new(4);
        let id = place(&mut grid, 0, 0, 16);

        grid.move_tile(id, Position::new(3, 0));

        assert!(grid.cell_available(Position::new(0, 0)));
        assert_eq!(grid.tile(id).unwrap().position(), Position::new(3, 0));
        assert_eq!(
            grid.cell_content(Position::new(3, 0)).unwrap().map(|t| t.id),
            Some(id)
        );
    }

    #[test]
    fn test_move_tile_in_place() {
        let mut grid = Grid::new(2);
        let id = place(&mut grid, 1, 0, 4);
        grid.move_tile(id, Position::new(1, 0));
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.tile(id).unwrap().position(), Position::new(1, 0));
    }

    #[test]
    fn test_each_cell_order() {
        let grid = Grid::new(2);
        let mut visited = Vec::new();
        grid.each_cell(|pos, _| visited.push(pos));

        assert_eq!(
            visited,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_random_available_cell() {
        let mut grid = Grid::new(2);
        place(&mut grid, 0, 0, 2);

        // Empty cells in order: (0,1), (1,0), (1,1)
        let mut rng = ScriptedRng::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(grid.random_available_cell(&mut rng), Ok(Position::new(0, 1)));
        assert_eq!(grid.random_available_cell(&mut rng), Ok(Position::new(1, 0)));
        assert_eq!(grid.random_available_cell(&mut rng), Ok(Position::new(1, 1)));
    }

    #[test]
    fn test_random_available_cell_on_full_grid() {
        let mut grid = Grid::new(1);
        place(&mut grid, 0, 0, 2);

        let mut rng = ScriptedRng::constant(0.3);
        assert!(!grid.cells_available());
        assert_eq!(
            grid.random_available_cell(&mut rng),
            Err(GridError::NoAvailableCell)
        );
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_snapshot_shape() {
        let mut grid = Grid::new(2);
        place(&mut grid, 1, 0, 32);

        let snapshot = grid.snapshot();
        assert_eq!(snapshot.size, 2);
        assert_eq!(snapshot.cells[1][0], Some(TileSnapshot { x: 1, y: 0, value: 32 }));
        assert_eq!(snapshot.cells[0][1], None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = Grid::new(3);
        place(&mut grid, 0, 2, 2);
        place(&mut grid, 2, 1, 16);

        let snapshot = grid.snapshot();
        let restored = Grid::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.tile_count(), 2);
    }

    #[test]
    fn test_from_snapshot_rejects_bad_shapes() {
        let mut snapshot = GridSnapshot::empty(2);
        snapshot.cells.pop();
        assert!(matches!(
            Grid::from_snapshot(&snapshot),
            Err(SnapshotError::ColumnCount { expected: 2, found: 1 })
        ));

        let mut snapshot = GridSnapshot::empty(2);
        snapshot.cells[1].push(None);
        assert!(matches!(
            Grid::from_snapshot(&snapshot),
            Err(SnapshotError::RowLength { column: 1, .. })
        ));

        assert!(matches!(
            Grid::from_snapshot(&GridSnapshot::empty(0)),
            Err(SnapshotError::ZeroSize)
        ));

        // Rejected before the cells are looked at
        let snapshot = GridSnapshot {
            size: usize::MAX,
            cells: Vec::new(),
        };
        assert!(matches!(
            Grid::from_snapshot(&snapshot),
            Err(SnapshotError::SizeTooLarge { max: MAX_SIZE, .. })
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_bad_tiles() {
        let mut snapshot = GridSnapshot::empty(2);
        snapshot.cells[0][1] = Some(TileSnapshot { x: 1, y: 1, value: 2 });
        assert!(matches!(
            Grid::from_snapshot(&snapshot),
            Err(SnapshotError::TileMisplaced { x: 0, y: 1, .. })
        ));

        let mut snapshot = GridSnapshot::empty(2);
        snapshot.cells[1][1] = Some(TileSnapshot { x: 1, y: 1, value: 0 });
        assert!(matches!(
            Grid::from_snapshot(&snapshot),
            Err(SnapshotError::ZeroValue { x: 1, y: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(2);
        place(&mut grid, 1, 0, 4);
        place(&mut grid, 0, 1, 16);

        assert_eq!(format!("{grid}"), "  .   4\n 16   .\n");
    }
}

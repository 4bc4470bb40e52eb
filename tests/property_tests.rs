//! Property tests over random boards and move sequences.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use rpsls_tiles::core::{Direction, GameConfig, GameRng, Position, ScriptedRng};
use rpsls_tiles::resources::ResourceCounters;
use rpsls_tiles::rules::{find_farthest_position, MoveResolver, Traversals};
use rpsls_tiles::session::{GameManager, MemoryStorage, NullActuator};
use rpsls_tiles::{Grid, GridSnapshot};

const VALUES: [u32; 5] = [2, 4, 8, 16, 32];

fn direction() -> impl Strategy<Value = Direction> {
    (0usize..4).prop_map(|i| Direction::ALL[i])
}

/// A board of `size` with each cell empty or holding a hand value.
fn board(size: usize) -> impl Strategy<Value = Grid> {
    prop::collection::vec(prop::option::of(0usize..VALUES.len()), size * size).prop_map(
        move |cells| {
            let mut grid = Grid::new(size);
            for (i, cell) in cells.into_iter().enumerate() {
                if let Some(v) = cell {
                    let pos = Position::new((i / size) as i32, (i % size) as i32);
                    let tile = grid.new_tile(pos, VALUES[v]);
                    grid.insert_tile(tile);
                }
            }
            grid
        },
    )
}

fn sized_board() -> impl Strategy<Value = Grid> {
    (1usize..=5).prop_flat_map(board)
}

fn occupied(grid: &Grid) -> Vec<(i32, i32, u32)> {
    let mut cells = Vec::new();
    grid.each_cell(|pos, tile| {
        if let Some(tile) = tile {
            cells.push((pos.x, pos.y, tile.value));
        }
    });
    cells
}

proptest! {
    /// Test that every traversal is a permutation of the board.
    #[test]
    fn prop_traversal_covers_board(size in 1usize..=8, dir in direction()) {
        let cells: Vec<_> = Traversals::build(size, dir.vector()).cells().collect();
        let unique: FxHashSet<_> = cells.iter().copied().collect();
        prop_assert_eq!(cells.len(), size * size);
        prop_assert_eq!(unique.len(), size * size);
    }

    /// Test that the farthest cell is on the board and the next one is not free.
    #[test]
    fn prop_farthest_position(grid in sized_board(), dir in direction(), seed in any::<u64>()) {
        let size = grid.size() as i32;
        let start = Position::new((seed % size as u64) as i32, ((seed / 7) % size as u64) as i32);
        let found = find_farthest_position(&grid, start, dir.vector());

        prop_assert!(grid.within_bounds(found.farthest));
        prop_assert!(!grid.cell_available(found.next));
        prop_assert_eq!(found.farthest.step(dir.vector()), found.next);
    }

    /// Test that a resolved move keeps cells and tiles consistent.
    #[test]
    fn prop_move_keeps_grid_consistent(
        grid in sized_board(),
        dir in direction(),
        charge in 0u32..3,
        seed in any::<u64>(),
    ) {
        let mut grid = grid;
        let before = grid.tile_count();
        let mut counters = ResourceCounters::filled(charge);
        let total_before = counters.total();

        let outcome = MoveResolver::resolve(&mut grid, &mut counters, &mut GameRng::new(seed), dir);
        MoveResolver::prepare_tiles(&mut grid);

        // Each encounter removes one tile
        prop_assert_eq!(grid.tile_count() + outcome.encounters.len(), before);
        prop_assert_eq!(outcome.score_delta as usize, outcome.encounters.len() * 5);
        // Spending and refunding balance out
        prop_assert_eq!(counters.total(), total_before);

        for tile in grid.tiles() {
            let at = grid.cell_content(tile.position()).unwrap();
            prop_assert_eq!(at.map(|t| t.id), Some(tile.id));
        }
    }

    /// Test that a move that reports no movement leaves the board unchanged.
    #[test]
    fn prop_unmoved_means_unchanged(grid in sized_board(), dir in direction()) {
        let mut grid = grid;
        let before = occupied(&grid);

        let outcome = MoveResolver::resolve(
            &mut grid,
            &mut ResourceCounters::default(),
            &mut ScriptedRng::default(),
            dir,
        );

        if !outcome.moved {
            prop_assert_eq!(occupied(&grid), before);
        }
    }

    /// Test that boards survive a trip through their persisted form.
    #[test]
    fn prop_grid_snapshot_restores(grid in sized_board()) {
        let snapshot = grid.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: GridSnapshot = serde_json::from_str(&json).unwrap();
        let restored = Grid::from_snapshot(&decoded).unwrap();

        prop_assert_eq!(occupied(&restored), occupied(&grid));
    }

    /// Test that seeded sessions replay identically.
    #[test]
    fn prop_seeded_sessions_replay(seed in any::<u64>(), moves in prop::collection::vec(direction(), 0..40)) {
        let play = || {
            let mut game = GameManager::new(
                GameConfig::default(),
                NullActuator,
                MemoryStorage::new(),
                GameRng::new(seed),
            )
            .unwrap();
            game.keep_playing();
            for &dir in &moves {
                game.move_tiles(dir);
            }
            game.serialize()
        };

        prop_assert_eq!(play(), play());
    }
}

//! Move resolution - sliding, encounters, and movement detection.
//!
//! ## Algorithm
//!
//! 1. Prepare: drop tiles detached last move, clear every tile's
//!    `merged_from` and record its pre-move position.
//! 2. Traverse cells so that tiles nearest the destination edge go first
//!    (see [`Traversals`]); a tile never jumps over one that has yet to move.
//! 3. For each tile, find the farthest empty cell along the direction and
//!    the first obstacle beyond it.
//! 4. If the obstacle is an unmerged tile and the pair is charged in the
//!    beats matrix, the moving tile takes the obstacle's cell as a new merged
//!    tile carrying the mover's value. Otherwise the tile slides.
//! 5. The move counts as moved if any tile ended somewhere other than the
//!    cell it started from.
//!
//! Equal values never combine; only beats-matrix pairs do.

use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::beats::{active_rule, BeatsRule, ENCOUNTER_SCORE};
use crate::board::{Grid, Tile, TileId};
use crate::core::{Direction, Position, RandomSource, Vector, MAX_SIZE};
use crate::resources::{Resource, ResourceCounters};

/// Per-axis visiting order for one direction.
///
/// Both axes run `0..size`; the x axis is reversed when moving right and the
/// y axis when moving down. Cells are visited x outer, y inner.
///
/// Sizes are bounded by [`MAX_SIZE`], like [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversals {
    pub x: SmallVec<[i32; 8]>,
    pub y: SmallVec<[i32; 8]>,
}

impl Traversals {
    #[must_use]
    pub fn build(size: usize, vector: Vector) -> Self {
        assert!(size <= MAX_SIZE, "Traversal size {size} exceeds {MAX_SIZE}");
        let mut x: SmallVec<[i32; 8]> = (0..size as i32).collect();
        let mut y: SmallVec<[i32; 8]> = (0..size as i32).collect();

        if vector.x == 1 {
            x.reverse();
        }
        if vector.y == 1 {
            y.reverse();
        }

        Self { x, y }
    }

    /// Cells in visiting order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.x
            .iter()
            .flat_map(move |&x| self.y.iter().map(move |&y| Position::new(x, y)))
    }
}

/// Where a tile would come to rest, and what stops it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell reached (the start cell if it cannot move).
    pub farthest: Position,
    /// First cell beyond `farthest`: occupied or off the board.
    pub next: Position,
}

/// Walk from `cell` along `vector` while the next cell is on the board and empty.
#[must_use]
pub fn find_farthest_position(grid: &Grid, cell: Position, vector: Vector) -> FarthestPosition {
    let mut farthest = cell;
    let mut next = cell.step(vector);

    while grid.cell_available(next) {
        farthest = next;
        next = farthest.step(vector);
    }

    FarthestPosition { farthest, next }
}

/// One beats-matrix merge that happened during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub rule: BeatsRule,
    /// Cell the merge happened in.
    pub at: Position,
    pub attacker: TileId,
    pub defender: TileId,
    /// The tile now occupying `at`.
    pub merged: TileId,
    /// Counter refunded by the encounter.
    pub granted: Resource,
}

/// Result of resolving one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// True when any tile left its starting cell.
    pub moved: bool,
    pub score_delta: u32,
    pub encounters: SmallVec<[Encounter; 4]>,
}

/// Resolves moves on a grid.
pub struct MoveResolver;

impl MoveResolver {
    /// Reset per-move bookkeeping on every tile.
    pub fn prepare_tiles(grid: &mut Grid) {
        grid.prune_detached();
        for id in grid.tile_ids() {
            if let Some(tile) = grid.tile_mut(id) {
                tile.merged_from = None;
                tile.save_position();
            }
        }
    }

    /// Resolve a move in `direction`.
    ///
    /// Mutates the grid and counters in place and reports the score earned.
    /// Does not spawn tiles or check for game over.
    #[instrument(level = "debug", skip(grid, counters, rng))]
    pub fn resolve<R: RandomSource + ?Sized>(
        grid: &mut Grid,
        counters: &mut ResourceCounters,
        rng: &mut R,
        direction: Direction,
    ) -> MoveOutcome {
        let vector = direction.vector();
        let traversals = Traversals::build(grid.size(), vector);

        Self::prepare_tiles(grid);

        let mut outcome = MoveOutcome {
            direction,
            moved: false,
            score_delta: 0,
            encounters: SmallVec::new(),
        };

        for cell in traversals.cells() {
            let Some((tile_id, value)) = grid
                .cell_content(cell)
                .ok()
                .flatten()
                .map(|tile| (tile.id, tile.value))
            else {
                continue;
            };

            let positions = find_farthest_position(grid, cell, vector);

            // Off-board `next` has no occupant; a tile merged this move is
            // only an obstacle.
            let target = grid
                .cell_content(positions.next)
                .ok()
                .flatten()
                .filter(|blocker| !blocker.is_merged())
                .and_then(|blocker| {
                    active_rule(value, blocker.value, counters).map(|rule| (blocker.id, rule))
                });

            match target {
                Some((blocker_id, rule)) => {
                    let encounter =
                        Self::merge(grid, counters, rng, tile_id, blocker_id, positions.next, rule);
                    outcome.score_delta += ENCOUNTER_SCORE;
                    outcome.encounters.push(encounter);
                }
                None => grid.move_tile(tile_id, positions.farthest),
            }

            if grid.tile(tile_id).map(Tile::position) != Some(cell) {
                outcome.moved = true;
            }
        }

        outcome
    }

    fn merge<R: RandomSource + ?Sized>(
        grid: &mut Grid,
        counters: &mut ResourceCounters,
        rng: &mut R,
        attacker: TileId,
        defender: TileId,
        at: Position,
        rule: &BeatsRule,
    ) -> Encounter {
        let mut merged = grid.new_tile(at, rule.attacker);
        merged.merged_from = Some([attacker, defender]);
        let merged = grid.insert_tile(merged);

        grid.remove_tile(attacker);
        if let Some(tile) = grid.tile_mut(attacker) {
            tile.update_position(at);
        }

        let granted = rule.apply(counters, rng);
        debug!(
            attacker = rule.attacker,
            defender = rule.defender,
            spent = %rule.gate,
            %granted,
            %at,
            "encounter"
        );

        Encounter {
            rule: *rule,
            at,
            attacker,
            defender,
            merged,
            granted,
        }
    }
}

/// True when some tile has an orthogonal neighbour of equal value.
#[must_use]
pub fn tile_matches_available(grid: &Grid) -> bool {
    grid.tiles().any(|tile| {
        Direction::ALL.iter().any(|direction| {
            let neighbour = tile.position().step(direction.vector());
            grid.cell_content(neighbour)
                .ok()
                .flatten()
                .is_some_and(|other| other.value == tile.value)
        })
    })
}

/// True while the session can continue: an empty cell or an equal-value pair.
#[must_use]
pub fn moves_available(grid: &Grid) -> bool {
    grid.cells_available() || tile_matches_available(grid)
}

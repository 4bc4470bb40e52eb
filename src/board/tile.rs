//! Tiles - the pieces on the board.
//!
//! A `Tile` knows its own position; the grid stores only [`TileId`]s, so
//! there is no reference cycle between the two. Tiles are created by the
//! grid's arena and never change identity.
//!
//! ## Turn bookkeeping
//!
//! - `previous_position`: where the tile stood before the current move,
//!   captured by [`Tile::save_position`]
//! - `merged_from`: the (moving, blocker) pair a merged tile was made from.
//!   A tile with provenance cannot be merged into again in the same move.

use serde::{Deserialize, Serialize};

use super::snapshot::TileSnapshot;
use crate::core::Position;

/// Identifier of a tile in the grid's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A single game piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub x: i32,
    pub y: i32,
    pub value: u32,

    /// Position before the current move, for animation continuity.
    pub previous_position: Option<Position>,

    /// `[moving, blocker]` when this tile was produced by a merge this move.
    pub merged_from: Option<[TileId; 2]>,
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Remember the current position as the pre-move baseline.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position());
    }

    pub fn update_position(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
    }

    /// True when this tile was created by a merge during the current move.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            x: self.x,
            y: self.y,
            value: self.value,
        }
    }
}

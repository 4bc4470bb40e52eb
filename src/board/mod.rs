//! Board state: tiles, the grid that holds them, and their serialized form.

pub mod grid;
pub mod snapshot;
pub mod tile;

pub use grid::{Grid, GridError};
pub use snapshot::{GridSnapshot, SnapshotError, TileSnapshot};
pub use tile::{Tile, TileId};

//! Serialized board shapes and restore errors.
//!
//! Cells are nested column-first: `cells[x][y]`, each either `null` or a
//! tile object.
//!
//! ```json
//! { "size": 2, "cells": [[{"x":0,"y":0,"value":2}, null], [null, null]] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tile as persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub x: i32,
    pub y: i32,
    pub value: u32,
}

/// A grid as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: usize,
    pub cells: Vec<Vec<Option<TileSnapshot>>>,
}

impl GridSnapshot {
    /// An all-empty snapshot of the given size.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }
}

/// A snapshot that cannot be restored.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("grid size must be positive")]
    ZeroSize,

    #[error("grid size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {column} has {found} cells, expected {expected}")]
    RowLength {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile claims ({tile_x}, {tile_y}) but is stored at ({x}, {y})")]
    TileMisplaced {
        x: usize,
        y: usize,
        tile_x: i32,
        tile_y: i32,
    },

    #[error("tile at ({x}, {y}) has value 0")]
    ZeroValue { x: usize, y: usize },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

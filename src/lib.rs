//! # rpsls-tiles
//!
//! Rules engine for a 2048-style sliding puzzle where tiles fight instead of
//! doubling. Tile values stand for rock (2), paper (4), scissors (8),
//! lizard (16) and Spock (32); a tile that slides into one it beats takes
//! its place, provided the matching special-move counter is charged.
//!
//! ## Design Principles
//!
//! 1. **Headless**: input, rendering and durable storage are collaborators
//!    behind traits. The engine only owns game state and rules.
//!
//! 2. **Deterministic**: every random decision goes through one
//!    [`RandomSource`], so a seed (or a scripted draw list) reproduces a
//!    whole session.
//!
//! 3. **No reference cycles**: tiles live in an arena owned by the grid;
//!    cells hold [`TileId`]s.
//!
//! ## Modules
//!
//! - `core`: positions, directions, randomness, configuration
//! - `board`: tiles, the grid, serialized board shapes
//! - `resources`: the nine special-move counters
//! - `rules`: beats matrix, spawn cascade, move resolution
//! - `session`: game manager, snapshots, storage and actuator traits

pub mod board;
pub mod core;
pub mod resources;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Direction, GameConfig, GameRng, Position, RandomSource, ScriptedRng,
};

pub use crate::board::{Grid, GridError, GridSnapshot, SnapshotError, Tile, TileId, TileSnapshot};

pub use crate::resources::{Resource, ResourceCounters};

pub use crate::rules::{BeatsRule, Encounter, Grant, MoveOutcome, MoveResolver, BEATS_MATRIX};

pub use crate::session::{
    Actuator, GameManager, GameSnapshot, InputEvent, MemoryStorage, Metadata, NullActuator,
    StorageManager,
};

//! Core types: positions, directions, randomness, configuration.
//!
//! These have no knowledge of tiles or rules and are shared by every
//! other module.

pub mod config;
pub mod position;
pub mod rng;

pub use config::{ConfigError, GameConfig, MAX_SIZE};
pub use position::{Direction, Position, Vector};
pub use rng::{GameRng, RandomSource, ScriptedRng};

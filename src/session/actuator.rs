//! Rendering collaborator.

use serde::Serialize;

use crate::board::Grid;
use crate::resources::ResourceCounters;

/// Summary handed to the actuator alongside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub score: u32,
    #[serde(flatten)]
    pub counters: ResourceCounters,
    pub over: bool,
    pub won: bool,
    pub best_score: u32,
    /// Over, or won without keep-playing.
    pub terminated: bool,
}

/// Draws the game. Implemented by the UI layer.
pub trait Actuator {
    /// Render the board and summary after a completed turn or setup.
    fn actuate(&mut self, grid: &Grid, metadata: &Metadata);

    /// Clear any won/lost banner.
    fn continue_game(&mut self);
}

/// An actuator that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn actuate(&mut self, _grid: &Grid, _metadata: &Metadata) {}

    fn continue_game(&mut self) {}
}

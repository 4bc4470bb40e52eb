//! Persisted session format.
//!
//! The JSON shape is what storage backends hold between sessions:
//!
//! ```json
//! {
//!   "grid": { "size": 4, "cells": [[null, ...], ...] },
//!   "score": 15,
//!   "crush": 0, "cover": 1, "cut": 0, "disprove": 0, "decapitate": 2,
//!   "eat": 0, "poison": 0, "smash": 0, "vaporize": 0,
//!   "over": false, "won": false, "keepPlaying": false
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{GridSnapshot, SnapshotError};
use crate::resources::ResourceCounters;

/// A complete saved session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub grid: GridSnapshot,
    pub score: u32,
    pub crush: u32,
    pub cover: u32,
    pub cut: u32,
    pub disprove: u32,
    pub decapitate: u32,
    pub eat: u32,
    pub poison: u32,
    pub smash: u32,
    pub vaporize: u32,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
}

impl GameSnapshot {
    /// The nine counters as one value.
    #[must_use]
    pub fn counters(&self) -> ResourceCounters {
        ResourceCounters {
            crush: self.crush,
            cover: self.cover,
            cut: self.cut,
            disprove: self.disprove,
            decapitate: self.decapitate,
            eat: self.eat,
            poison: self.poison,
            smash: self.smash,
            vaporize: self.vaporize,
        }
    }

    pub fn set_counters(&mut self, counters: &ResourceCounters) {
        self.crush = counters.crush;
        self.cover = counters.cover;
        self.cut = counters.cut;
        self.disprove = counters.disprove;
        self.decapitate = counters.decapitate;
        self.eat = counters.eat;
        self.poison = counters.poison;
        self.smash = counters.smash;
        self.vaporize = counters.vaporize;
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

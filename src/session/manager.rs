//! Session orchestration.
//!
//! [`GameManager`] owns the board, counters, score and random source for one
//! session and drives the collaborators:
//!
//! - setup: restore the saved session or deal a fresh board, then render
//! - turn: resolve the move; if anything moved, spawn a tile, check for game
//!   over, persist and render
//! - restart / keep playing: respond to the corresponding input events
//!
//! ```
//! use rpsls_tiles::core::{Direction, GameConfig, GameRng};
//! use rpsls_tiles::session::{GameManager, MemoryStorage, NullActuator};
//!
//! let mut game = GameManager::new(
//!     GameConfig::default(),
//!     NullActuator,
//!     MemoryStorage::new(),
//!     GameRng::new(7),
//! )
//! .unwrap();
//!
//! assert_eq!(game.grid().tile_count(), 2);
//! game.move_tiles(Direction::Left);
//! assert!(game.storage().raw_state().is_some());
//! ```

use tracing::{debug, info, warn};

use super::actuator::{Actuator, Metadata};
use super::snapshot::GameSnapshot;
use super::storage::StorageManager;
use crate::board::{Grid, SnapshotError, TileId};
use crate::core::{ConfigError, Direction, GameConfig, GameRng, RandomSource};
use crate::resources::ResourceCounters;
use crate::rules::{self, MoveOutcome, MoveResolver};

/// Events an input layer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Restart,
    KeepPlaying,
}

/// One game session and its collaborators.
pub struct GameManager<A, S, R = GameRng>
where
    A: Actuator,
    S: StorageManager,
    R: RandomSource,
{
    config: GameConfig,
    actuator: A,
    storage: S,
    rng: R,

    grid: Grid,
    score: u32,
    counters: ResourceCounters,
    over: bool,
    won: bool,
    keep_playing: bool,
}

impl<A, S, R> GameManager<A, S, R>
where
    A: Actuator,
    S: StorageManager,
    R: RandomSource,
{
    /// Create a session and run setup.
    ///
    /// Setup restores the stored session when there is a readable one and
    /// otherwise deals a fresh board; either way the actuator is called once.
    pub fn new(config: GameConfig, actuator: A, storage: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut manager = Self {
            grid: Grid::new(config.size),
            config,
            actuator,
            storage,
            rng,
            score: 0,
            counters: ResourceCounters::default(),
            over: false,
            won: false,
            keep_playing: false,
        };
        manager.setup();
        Ok(manager)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn counters(&self) -> &ResourceCounters {
        &self.counters
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_keep_playing(&self) -> bool {
        self.keep_playing
    }

    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Lost, or won and not continuing.
    #[must_use]
    pub fn is_game_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    // === Input ===

    /// Dispatch an input event. Returns the move outcome for resolved moves.
    pub fn handle(&mut self, event: InputEvent) -> Option<MoveOutcome> {
        match event {
            InputEvent::Move(direction) => self.move_tiles(direction),
            InputEvent::Restart => {
                self.restart();
                None
            }
            InputEvent::KeepPlaying => {
                self.keep_playing();
                None
            }
        }
    }

    /// Play one turn.
    ///
    /// Returns `None` when the session is terminated and the input was
    /// ignored. Spawning, the game-over check, persistence and rendering only
    /// happen when the move changed the board.
    pub fn move_tiles(&mut self, direction: Direction) -> Option<MoveOutcome> {
        if self.is_game_terminated() {
            debug!(%direction, "ignoring move on a finished game");
            return None;
        }

        let outcome = MoveResolver::resolve(
            &mut self.grid,
            &mut self.counters,
            &mut self.rng,
            direction,
        );
        self.score = self.score.saturating_add(outcome.score_delta);

        if outcome.moved {
            self.add_random_tile();

            if !self.moves_available() {
                self.over = true;
                info!(score = self.score, "game over");
            }

            self.actuate();
        }

        Some(outcome)
    }

    /// Discard the session and deal a new one.
    pub fn restart(&mut self) {
        info!(score = self.score, "restarting");
        self.storage.clear_game_state();
        self.actuator.continue_game();
        self.setup();
    }

    /// Continue past a win with every counter recharged.
    ///
    /// Score and board are untouched.
    pub fn keep_playing(&mut self) {
        self.keep_playing = true;
        self.counters.set_all(self.config.keep_playing_charge);
        info!(charge = self.config.keep_playing_charge, "keep playing");
        self.actuator.continue_game();
    }

    // === Rules ===

    /// An empty cell exists, or two equal tiles touch.
    #[must_use]
    pub fn moves_available(&self) -> bool {
        rules::moves_available(&self.grid)
    }

    /// Spawn one tile on a random empty cell. Does nothing on a full board.
    pub fn add_random_tile(&mut self) -> Option<TileId> {
        if !self.grid.cells_available() {
            return None;
        }

        let value = rules::spawn_value(&mut self.rng);
        let position = self.grid.random_available_cell(&mut self.rng).ok()?;
        let tile = self.grid.new_tile(position, value);
        debug!(%position, value, "spawned tile");
        Some(self.grid.insert_tile(tile))
    }

    // === Persistence ===

    /// The session as persisted.
    #[must_use]
    pub fn serialize(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot {
            grid: self.grid.snapshot(),
            score: self.score,
            crush: 0,
            cover: 0,
            cut: 0,
            disprove: 0,
            decapitate: 0,
            eat: 0,
            poison: 0,
            smash: 0,
            vaporize: 0,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
        };
        snapshot.set_counters(&self.counters);
        snapshot
    }

    fn setup(&mut self) {
        match self.storage.game_state() {
            Some(snapshot) => match self.restore(&snapshot) {
                Ok(()) => info!(score = self.score, "restored saved game"),
                Err(err) => {
                    warn!(%err, "discarding saved game");
                    self.start_fresh();
                }
            },
            None => self.start_fresh(),
        }

        self.actuate();
    }

    fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
        self.grid = Grid::from_snapshot(&snapshot.grid)?;
        self.score = snapshot.score;
        self.counters = snapshot.counters();
        self.over = snapshot.over;
        self.won = snapshot.won;
        self.keep_playing = snapshot.keep_playing;
        Ok(())
    }

    fn start_fresh(&mut self) {
        self.grid = Grid::new(self.config.size);
        self.score = 0;
        self.counters = ResourceCounters::default();
        self.over = false;
        self.won = false;
        self.keep_playing = false;

        for _ in 0..self.config.start_tiles {
            self.add_random_tile();
        }
        info!(size = self.config.size, "started new game");
    }

    fn actuate(&mut self) {
        if self.storage.best_score() < self.score {
            self.storage.set_best_score(self.score);
        }

        // A finished game must not resume
        if self.over {
            self.storage.clear_game_state();
        } else {
            self.storage.set_game_state(&self.serialize());
        }

        let metadata = Metadata {
            score: self.score,
            counters: self.counters,
            over: self.over,
            won: self.won,
            best_score: self.storage.best_score(),
            terminated: self.is_game_terminated(),
        };
        self.actuator.actuate(&self.grid, &metadata);
    }
}

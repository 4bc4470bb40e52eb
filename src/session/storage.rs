//! Persistence collaborator.
//!
//! The engine never touches disk or browser storage itself; it calls a
//! [`StorageManager`]. [`MemoryStorage`] keeps everything in memory and is
//! what tests and headless runs use.

use tracing::warn;

use super::snapshot::GameSnapshot;

/// Where sessions and the best score are kept between runs.
pub trait StorageManager {
    /// The saved session, if any.
    fn game_state(&self) -> Option<GameSnapshot>;

    fn set_game_state(&mut self, snapshot: &GameSnapshot);

    fn clear_game_state(&mut self);

    /// Best score ever reached; 0 when nothing is stored.
    fn best_score(&self) -> u32;

    fn set_best_score(&mut self, score: u32);
}

/// In-memory storage holding the session as a JSON string.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    game_state: Option<String>,
    best_score: u32,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-loaded with a raw JSON session, as read back from a
    /// browser's local storage.
    #[must_use]
    pub fn with_raw_state(json: impl Into<String>) -> Self {
        Self {
            game_state: Some(json.into()),
            best_score: 0,
        }
    }

    /// The stored JSON, exactly as written.
    #[must_use]
    pub fn raw_state(&self) -> Option<&str> {
        self.game_state.as_deref()
    }
}

impl StorageManager for MemoryStorage {
    fn game_state(&self) -> Option<GameSnapshot> {
        let json = self.game_state.as_deref()?;
        match GameSnapshot::from_json(json) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(%err, "ignoring unreadable saved game");
                None
            }
        }
    }

    fn set_game_state(&mut self, snapshot: &GameSnapshot) {
        match snapshot.to_json() {
            Ok(json) => self.game_state = Some(json),
            Err(err) => warn!(%err, "failed to encode game state"),
        }
    }

    fn clear_game_state(&mut self) {
        self.game_state = None;
    }

    fn best_score(&self) -> u32 {
        self.best_score
    }

    fn set_best_score(&mut self, score: u32) {
        self.best_score = score;
    }
}

//! Session configuration.
//!
//! ```
//! use rpsls_tiles::core::GameConfig;
//!
//! let config = GameConfig::default().with_size(5);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.start_tiles, 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board edge length.
pub const DEFAULT_SIZE: usize = 4;

/// Tiles spawned when a fresh session starts.
pub const DEFAULT_START_TILES: usize = 2;

/// Largest board edge length. Coordinates are `i32`, so every cell index
/// along an axis must fit in one.
pub const MAX_SIZE: usize = i32::MAX as usize;

/// Value every counter is set to when the player chooses to keep playing.
pub const DEFAULT_KEEP_PLAYING_CHARGE: u32 = 100;

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroSize,

    #[error("board size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("{start_tiles} start tiles do not fit on a {size}x{size} board")]
    TooManyStartTiles { start_tiles: usize, size: usize },
}

/// Configuration for a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length; the board is `size x size`.
    pub size: usize,

    /// Tiles spawned on a fresh board.
    pub start_tiles: usize,

    /// Counter value applied by keep-playing.
    pub keep_playing_charge: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: DEFAULT_START_TILES,
            keep_playing_charge: DEFAULT_KEEP_PLAYING_CHARGE,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    #[must_use]
    pub fn with_keep_playing_charge(mut self, charge: u32) -> Self {
        self.keep_playing_charge = charge;
        self
    }

    /// Check the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        let too_large = ConfigError::SizeTooLarge {
            size: self.size,
            max: MAX_SIZE,
        };
        if self.size > MAX_SIZE {
            return Err(too_large);
        }
        let cells = self.size.checked_mul(self.size).ok_or(too_large)?;
        if self.start_tiles > cells {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                size: self.size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.size, 4);
        assert_eq!(config.start_tiles, 2);
        assert_eq!(config.keep_playing_charge, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_size(6)
            .with_start_tiles(3)
            .with_keep_playing_charge(10);

        assert_eq!(config.size, 6);
        assert_eq!(config.start_tiles, 3);
        assert_eq!(config.keep_playing_charge, 10);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = GameConfig::default().with_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSize));
    }

    #[test]
    fn test_validate_rejects_overfull_start() {
        let config = GameConfig::default().with_size(1).with_start_tiles(2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyStartTiles { start_tiles: 2, size: 1 })
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_validate_rejects_huge_size() {
        let config = GameConfig::default().with_size(usize::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SizeTooLarge { size: usize::MAX, max: MAX_SIZE })
        );

        // Squaring this would overflow before the start-tile check
        let config = GameConfig::default().with_size(1 << 32);
        assert!(matches!(config.validate(), Err(ConfigError::SizeTooLarge { .. })));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_validate_accepts_max_size() {
        let config = GameConfig::default().with_size(MAX_SIZE).with_start_tiles(0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_serde() {
        let config = GameConfig::default().with_size(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

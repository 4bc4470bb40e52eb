//! Value selection for newly spawned tiles.
//!
//! The cascade below is kept exactly as the game has always played, quirks
//! included. Each comparison takes its own draw and `&&` short-circuits, so
//! the effective distribution is not the one the thresholds suggest:
//!
//! ```text
//! r1 < 0.2                  -> 2
//! r2 < 0.4 && r3 > 0.2      -> 4
//! r4 < 0.6 && r5 > 0.4      -> 8
//! r6 > 0.8                  -> 32
//! otherwise                 -> 16
//! ```
//!
//! Roughly: 2 ≈ 20%, 4 ≈ 25.6%, 8 ≈ 19.6%, 16 ≈ 27.9%, 32 ≈ 7.0%.

use crate::core::RandomSource;

/// Values a spawned tile can take.
pub const SPAWN_VALUES: [u32; 5] = [2, 4, 8, 16, 32];

/// Pick the value for a new tile.
pub fn spawn_value<R: RandomSource + ?Sized>(rng: &mut R) -> u32 {
    if rng.next_f64() < 0.2 {
        2
    } else if rng.next_f64() < 0.4 && rng.next_f64() > 0.2 {
        4
    } else if rng.next_f64() < 0.6 && rng.next_f64() > 0.4 {
        8
    } else if rng.next_f64() > 0.8 {
        32
    } else {
        16
    }
}

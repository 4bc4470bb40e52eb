//! Game rules: the beats matrix, tile spawning, and move resolution.

pub mod beats;
pub mod resolver;
pub mod spawn;

pub use beats::{active_rule, find_rule, BeatsRule, Grant, BEATS_MATRIX, ENCOUNTER_SCORE};
pub use resolver::{
    find_farthest_position, moves_available, tile_matches_available, Encounter,
    FarthestPosition, MoveOutcome, MoveResolver, Traversals,
};
pub use spawn::{spawn_value, SPAWN_VALUES};

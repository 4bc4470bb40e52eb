//! The beats matrix.
//!
//! Tile values stand for the five hands of rock-paper-scissors-lizard-Spock:
//!
//! | value | hand     |
//! |-------|----------|
//! | 2     | rock     |
//! | 4     | paper    |
//! | 8     | scissors |
//! | 16    | lizard   |
//! | 32    | Spock    |
//!
//! A moving tile beats the tile blocking it when the pair appears in
//! [`BEATS_MATRIX`] and the pair's counter is charged. The relation is
//! directional: rock crushes scissors, but scissors sliding into rock is
//! just blocked.
//!
//! ```
//! use rpsls_tiles::resources::Resource;
//! use rpsls_tiles::rules::beats::find_rule;
//!
//! let rule = find_rule(2, 8).unwrap();
//! assert_eq!(rule.gate, Resource::Crush);
//! assert!(find_rule(8, 2).is_none());
//! ```

use crate::core::RandomSource;
use crate::resources::{Resource, ResourceCounters};

use Grant::{EitherOf, Fixed};
use Resource::{Cover, Crush, Cut, Decapitate, Disprove, Eat, Poison, Smash, Vaporize};

/// Score awarded for every encounter.
pub const ENCOUNTER_SCORE: u32 = 5;

/// What an encounter refunds after spending its gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    /// Always refund this counter.
    Fixed(Resource),
    /// Refund the first when a draw exceeds 0.5, otherwise the second.
    EitherOf(Resource, Resource),
}

impl Grant {
    /// Resolve to a single counter, drawing from `rng` for a coin flip.
    pub fn pick<R: RandomSource + ?Sized>(self, rng: &mut R) -> Resource {
        match self {
            Grant::Fixed(resource) => resource,
            Grant::EitherOf(first, second) => {
                if rng.next_f64() > 0.5 {
                    first
                } else {
                    second
                }
            }
        }
    }
}

/// One row of the beats matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatsRule {
    /// Value of the moving tile.
    pub attacker: u32,
    /// Value of the tile it runs into.
    pub defender: u32,
    /// Counter that must be charged, and is spent.
    pub gate: Resource,
    pub grant: Grant,
}

impl BeatsRule {
    const fn new(attacker: u32, defender: u32, gate: Resource, grant: Grant) -> Self {
        Self {
            attacker,
            defender,
            gate,
            grant,
        }
    }

    /// Spend the gate and apply the grant. Returns the counter granted.
    ///
    /// Callers check [`ResourceCounters::is_charged`] first.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        counters: &mut ResourceCounters,
        rng: &mut R,
    ) -> Resource {
        counters.consume(self.gate);
        let granted = self.grant.pick(rng);
        counters.grant(granted);
        granted
    }
}

/// All encounters, in evaluation order.
pub const BEATS_MATRIX: [BeatsRule; 10] = [
    // rock crushes scissors
    BeatsRule::new(2, 8, Crush, EitherOf(Cut, Decapitate)),
    // rock crushes lizard
    BeatsRule::new(2, 16, Crush, EitherOf(Eat, Poison)),
    // paper covers rock
    BeatsRule::new(4, 2, Cover, Fixed(Crush)),
    // paper disproves Spock
    BeatsRule::new(4, 32, Disprove, EitherOf(Smash, Vaporize)),
    // scissors cut paper
    BeatsRule::new(8, 4, Cut, EitherOf(Cover, Disprove)),
    // scissors decapitate lizard
    BeatsRule::new(8, 16, Decapitate, EitherOf(Eat, Poison)),
    // lizard eats paper
    BeatsRule::new(16, 4, Eat, EitherOf(Cover, Disprove)),
    // lizard poisons Spock
    BeatsRule::new(16, 32, Poison, EitherOf(Smash, Vaporize)),
    // Spock vaporizes rock
    BeatsRule::new(32, 2, Vaporize, Fixed(Crush)),
    // Spock smashes scissors
    BeatsRule::new(32, 8, Smash, EitherOf(Cut, Decapitate)),
];

/// The rule for a moving value running into a blocking value, ignoring gates.
#[must_use]
pub fn find_rule(attacker: u32, defender: u32) -> Option<&'static BeatsRule> {
    BEATS_MATRIX
        .iter()
        .find(|rule| rule.attacker == attacker && rule.defender == defender)
}

/// The rule that fires right now, if any: known pair and charged gate.
#[must_use]
pub fn active_rule(
    attacker: u32,
    defender: u32,
    counters: &ResourceCounters,
) -> Option<&'static BeatsRule> {
    find_rule(attacker, defender).filter(|rule| counters.is_charged(rule.gate))
}

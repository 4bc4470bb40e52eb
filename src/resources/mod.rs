//! Consumable special-move charges.

pub mod counters;

pub use counters::{Resource, ResourceCounters};

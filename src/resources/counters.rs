//! Special-move charges.
//!
//! Each counter is the number of remaining uses of one "beats" verb. Using a
//! verb spends its charge and, in most cases, refunds a charge to one of two
//! other verbs, so the charges circulate rather than simply drain.

use serde::{Deserialize, Serialize};

/// The nine beats verbs, each backed by a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Crush,
    Cover,
    Cut,
    Disprove,
    Decapitate,
    Eat,
    Poison,
    Smash,
    Vaporize,
}

impl Resource {
    /// All resources in display/serialization order.
    pub const ALL: [Resource; 9] = [
        Resource::Crush,
        Resource::Cover,
        Resource::Cut,
        Resource::Disprove,
        Resource::Decapitate,
        Resource::Eat,
        Resource::Poison,
        Resource::Smash,
        Resource::Vaporize,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Crush => "crush",
            Resource::Cover => "cover",
            Resource::Cut => "cut",
            Resource::Disprove => "disprove",
            Resource::Decapitate => "decapitate",
            Resource::Eat => "eat",
            Resource::Poison => "poison",
            Resource::Smash => "smash",
            Resource::Vaporize => "vaporize",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The nine counters as one value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCounters {
    pub crush: u32,
    pub cover: u32,
    pub cut: u32,
    pub disprove: u32,
    pub decapitate: u32,
    pub eat: u32,
    pub poison: u32,
    pub smash: u32,
    pub vaporize: u32,
}

impl ResourceCounters {
    /// Every counter set to `value`.
    #[must_use]
    pub fn filled(value: u32) -> Self {
        let mut counters = Self::default();
        counters.set_all(value);
        counters
    }

    #[must_use]
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Crush => self.crush,
            Resource::Cover => self.cover,
            Resource::Cut => self.cut,
            Resource::Disprove => self.disprove,
            Resource::Decapitate => self.decapitate,
            Resource::Eat => self.eat,
            Resource::Poison => self.poison,
            Resource::Smash => self.smash,
            Resource::Vaporize => self.vaporize,
        }
    }

    pub fn get_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Crush => &mut self.crush,
            Resource::Cover => &mut self.cover,
            Resource::Cut => &mut self.cut,
            Resource::Disprove => &mut self.disprove,
            Resource::Decapitate => &mut self.decapitate,
            Resource::Eat => &mut self.eat,
            Resource::Poison => &mut self.poison,
            Resource::Smash => &mut self.smash,
            Resource::Vaporize => &mut self.vaporize,
        }
    }

    pub fn set(&mut self, resource: Resource, value: u32) {
        *self.get_mut(resource) = value;
    }

    pub fn set_all(&mut self, value: u32) {
        for resource in Resource::ALL {
            self.set(resource, value);
        }
    }

    /// True when `resource` has at least one charge.
    #[must_use]
    pub fn is_charged(&self, resource: Resource) -> bool {
        self.get(resource) > 0
    }

    /// Spend one charge. Returns false (and changes nothing) when empty.
    pub fn consume(&mut self, resource: Resource) -> bool {
        let counter = self.get_mut(resource);
        if *counter == 0 {
            return false;
        }
        *counter -= 1;
        true
    }

    /// Add one charge.
    pub fn grant(&mut self, resource: Resource) {
        let counter = self.get_mut(resource);
        *counter = counter.saturating_add(1);
    }

    /// Sum of all charges.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, value)| u64::from(value)).sum()
    }

    /// `(resource, value)` pairs in [`Resource::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

//! Hideout Components

use bevy_ecs::prelude::*;

use super::kind::{EntityKind, Symbol};
use super::treasure::Treasure;
use crate::config::HideoutConfig;

/// Symbol drawn for hideouts
pub const HIDEOUT_SYMBOL: char = 'H';

/// Component: a hunters' base with a bounded roster and a treasure store
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Hideout {
    /// Resident hunters, in enrolment order
    pub hunters: Vec<Entity>,
    /// Deposited treasures, no longer on the grid
    pub treasures: Vec<Treasure>,
    pub capacity: usize,
}

impl Default for Hideout {
    fn default() -> Self {
        Self::new(HideoutConfig::default().capacity)
    }
}

impl Hideout {
    pub fn new(capacity: usize) -> Self {
        Self {
            hunters: Vec::new(),
            treasures: Vec::new(),
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.hunters.len() >= self.capacity
    }

    /// Enrol a hunter if there is room
    pub fn add_hunter(&mut self, hunter: Entity) -> bool {
        if self.is_full() || self.hunters.contains(&hunter) {
            return false;
        }
        self.hunters.push(hunter);
        true
    }

    pub fn remove_hunter(&mut self, hunter: Entity) -> bool {
        let before = self.hunters.len();
        self.hunters.retain(|h| *h != hunter);
        self.hunters.len() != before
    }

    pub fn add_treasure(&mut self, treasure: Treasure) {
        self.treasures.push(treasure);
    }

    /// Sum of the deposited treasures' values
    pub fn stored_value(&self) -> f64 {
        self.treasures.iter().map(|t| t.value).sum()
    }
}

/// Everything a hideout entity spawns with
#[derive(Bundle)]
pub struct HideoutBundle {
    pub kind: EntityKind,
    pub symbol: Symbol,
    pub hideout: Hideout,
}

impl HideoutBundle {
    pub fn new(hideout: Hideout) -> Self {
        Self {
            kind: EntityKind::Hideout,
            symbol: Symbol(HIDEOUT_SYMBOL),
            hideout,
        }
    }
}

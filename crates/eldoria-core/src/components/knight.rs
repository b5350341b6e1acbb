//! Knight Components

use bevy_ecs::prelude::*;

use super::kind::{EntityKind, Symbol};
use crate::config::KnightConfig;

/// Symbol drawn for knights
pub const KNIGHT_SYMBOL: char = 'K';

/// Component: a patrolling knight
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Knight {
    /// 0.0 to max_energy
    pub energy: f64,
    pub resting: bool,
}

impl Default for Knight {
    fn default() -> Self {
        Self::new()
    }
}

impl Knight {
    pub fn new() -> Self {
        Self {
            energy: KnightConfig::default().max_energy,
            resting: false,
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Pay for one chase step
    pub fn spend_chase(&mut self, config: &KnightConfig) {
        self.energy = (self.energy - config.chase_cost).max(0.0);
    }

    /// One tick of recovery; resting ends at full energy
    pub fn recover(&mut self, config: &KnightConfig) {
        self.energy = (self.energy + config.rest_regen).min(config.max_energy);
        if self.energy >= config.max_energy {
            self.resting = false;
        }
    }
}

/// Everything a knight entity spawns with
#[derive(Bundle)]
pub struct KnightBundle {
    pub kind: EntityKind,
    pub symbol: Symbol,
    pub knight: Knight,
}

impl KnightBundle {
    pub fn new(knight: Knight) -> Self {
        Self {
            kind: EntityKind::Knight,
            symbol: Symbol(KNIGHT_SYMBOL),
            knight,
        }
    }
}

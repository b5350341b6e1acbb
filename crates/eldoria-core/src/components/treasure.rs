//! Treasure Components

use bevy_ecs::prelude::*;
use eldoria_events::TreasureType;
use serde::{Deserialize, Serialize};

use super::kind::{EntityKind, Symbol};
use crate::config::TreasureConfig;

/// A decaying treasure. Lives on the grid until picked up, then travels
/// inside `Hunter::carrying` and ends in `Hideout::treasures`.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    pub treasure_type: TreasureType,
    pub value: f64,
}

impl Treasure {
    pub fn new(treasure_type: TreasureType) -> Self {
        Self {
            treasure_type,
            value: TreasureConfig::default().initial_value,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Apply one tick of decay. Returns false once the treasure is worthless.
    pub fn decay(&mut self, config: &TreasureConfig) -> bool {
        self.value *= config.decay_factor;
        self.value > config.removal_threshold
    }

    pub fn value_increase(&self) -> f64 {
        self.treasure_type.value_increase()
    }

    pub fn symbol(&self) -> char {
        self.treasure_type.symbol()
    }
}

/// Everything a treasure entity spawns with
#[derive(Bundle)]
pub struct TreasureBundle {
    pub kind: EntityKind,
    pub symbol: Symbol,
    pub treasure: Treasure,
}

impl TreasureBundle {
    pub fn new(treasure: Treasure) -> Self {
        Self {
            kind: EntityKind::Treasure,
            symbol: Symbol(treasure.symbol()),
            treasure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization() {
        for &treasure_type in TreasureType::all() {
            let treasure = Treasure::new(treasure_type);
            assert_eq!(treasure.value, 100.0);
        }
        assert_eq!(Treasure::new(TreasureType::Bronze).symbol(), 'B');
        assert_eq!(Treasure::new(TreasureType::Silver).symbol(), 'S');
        assert_eq!(Treasure::new(TreasureType::Gold).symbol(), 'G');
        assert_eq!(Treasure::new(TreasureType::Gold).value_increase(), 0.13);
    }

    #[test]
    fn test_value_decay() {
        let config = TreasureConfig::default();
        let mut bronze = Treasure::new(TreasureType::Bronze);

        assert!(bronze.decay(&config));
        assert!((bronze.value - 99.9).abs() < 1e-9);

        let mut steps = 1;
        while bronze.decay(&config) {
            steps += 1;
            assert!(bronze.value > 0.0);
        }
        steps += 1;

        assert!(bronze.value <= 0.1);
        let expected = 100.0 * 0.999f64.powi(steps);
        assert!((bronze.value - expected).abs() < 1e-9);
        // ln(0.001) / ln(0.999) is about 6904
        assert!(steps > 6900 && steps < 6910, "took {steps} ticks");
    }

    #[test]
    fn test_bundle_symbol_follows_type() {
        let bundle = TreasureBundle::new(Treasure::new(TreasureType::Silver));
        assert_eq!(bundle.kind, EntityKind::Treasure);
        assert_eq!(bundle.symbol, Symbol('S'));
    }
}

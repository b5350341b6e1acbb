//! Hunter Components
//!
//! Stamina, cargo and the short-lived memory of what a hunter has seen.

use bevy_ecs::prelude::*;
use eldoria_events::{HunterSkill, Position};
use std::collections::BTreeMap;

use super::kind::{EntityKind, Symbol};
use super::treasure::Treasure;
use crate::config::HunterConfig;

/// Component: a treasure hunter's body state
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Hunter {
    pub skill: HunterSkill,
    /// 0.0 to max_stamina
    pub stamina: f64,
    /// Treasure held off-grid, at most one
    pub carrying: Option<Treasure>,
    pub resting: bool,
    /// Ticks spent at zero stamina
    pub survival_steps: u32,
}

impl Hunter {
    pub fn new(skill: HunterSkill) -> Self {
        Self {
            skill,
            stamina: HunterConfig::default().max_stamina,
            carrying: None,
            resting: false,
            survival_steps: 0,
        }
    }

    pub fn with_stamina(mut self, stamina: f64) -> Self {
        self.stamina = stamina;
        self
    }

    pub fn symbol(&self) -> char {
        self.skill.symbol()
    }

    pub fn is_active(&self) -> bool {
        self.stamina > 0.0
    }

    /// Pay for one cell of movement
    pub fn spend_move(&mut self, config: &HunterConfig) {
        self.stamina = (self.stamina - config.move_cost).max(0.0);
    }

    /// One tick of recovery at a hideout
    pub fn rest(&mut self, config: &HunterConfig) {
        self.stamina = (self.stamina + config.rest_regen).min(config.max_stamina);
        if self.stamina >= config.rest_resume_threshold {
            self.resting = false;
        }
    }

    /// Lose stamina to a knight; any cargo is confiscated.
    /// Returns true if a treasure was lost.
    pub fn suffer_penalty(&mut self, penalty: f64) -> bool {
        self.stamina = (self.stamina - penalty).max(0.0);
        self.carrying.take().is_some()
    }
}

/// Component: what a hunter saw on its last scan
///
/// Keys are grid positions; values are the entities seen there.
/// Handles can go stale (a treasure picked up by someone else), so
/// readers must check the entity still exists.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HunterMemory {
    pub treasures: BTreeMap<Position, Entity>,
    pub hideouts: BTreeMap<Position, Entity>,
    pub knights: BTreeMap<Position, Entity>,
}

impl HunterMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.treasures.is_empty() && self.hideouts.is_empty() && self.knights.is_empty()
    }

    /// Fold another memory into this one; entries from `other` win on
    /// duplicate positions.
    pub fn merge(&mut self, other: &HunterMemory) {
        self.treasures.extend(other.treasures.iter().map(|(p, e)| (*p, *e)));
        self.hideouts.extend(other.hideouts.iter().map(|(p, e)| (*p, *e)));
        self.knights.extend(other.knights.iter().map(|(p, e)| (*p, *e)));
    }
}

/// Everything a hunter entity spawns with
#[derive(Bundle)]
pub struct HunterBundle {
    pub kind: EntityKind,
    pub symbol: Symbol,
    pub hunter: Hunter,
    pub memory: HunterMemory,
}

impl HunterBundle {
    pub fn new(hunter: Hunter) -> Self {
        Self {
            kind: EntityKind::Hunter,
            symbol: Symbol(hunter.symbol()),
            hunter,
            memory: HunterMemory::new(),
        }
    }
}

//! Entity Kind
//!
//! Tag components shared by every entity on the grid.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Which behavior drives an entity each tick
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Treasure,
    Hunter,
    Knight,
    Hideout,
}

/// Character drawn for the entity in the text grid
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol(pub char);

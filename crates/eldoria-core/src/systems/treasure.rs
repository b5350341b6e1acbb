//! Treasure decay

use bevy_ecs::prelude::*;

use crate::components::Treasure;
use crate::config::SimConfig;

/// Decay one treasure. Returns false once it should leave the grid.
pub fn update_treasure(world: &mut World, entity: Entity) -> bool {
    let config = world.resource::<SimConfig>().treasure.clone();
    match world.get_mut::<Treasure>(entity) {
        Some(mut treasure) => treasure.decay(&config),
        None => false,
    }
}

//! Perception System
//!
//! Square-radius scans of the grid around an observer.

use bevy_ecs::prelude::*;
use eldoria_events::Position;

use crate::components::{EntityKind, HunterMemory};
use crate::world::Grid;

/// Something seen during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    pub position: Position,
    pub entity: Entity,
    pub kind: EntityKind,
}

/// Every occupied cell within `radius` of `center` (Chebyshev, centre
/// excluded), in scan order: dx outer, dy inner, both ascending.
pub fn scan(world: &World, center: Position, radius: i64) -> Vec<Sighting> {
    let grid = world.resource::<Grid>();
    grid.neighborhood(center, radius)
        .into_iter()
        .filter_map(|position| {
            let entity = grid.get_entity(position)?;
            let kind = *world.get::<EntityKind>(entity)?;
            Some(Sighting { position, entity, kind })
        })
        .collect()
}

/// Build a fresh memory snapshot from what is visible around `center`
pub fn observe(world: &World, center: Position, radius: i64) -> HunterMemory {
    let mut memory = HunterMemory::new();
    for sighting in scan(world, center, radius) {
        let map = match sighting.kind {
            EntityKind::Treasure => &mut memory.treasures,
            EntityKind::Hideout => &mut memory.hideouts,
            EntityKind::Knight => &mut memory.knights,
            EntityKind::Hunter => continue,
        };
        map.insert(sighting.position, sighting.entity);
    }
    memory
}

//! Statistics Output
//!
//! Counts entities on the grid and treasure stored in hideouts.

use bevy_ecs::prelude::*;
use eldoria_events::SimStats;

use crate::components::{EntityKind, Hideout, Hunter};
use crate::systems::SimulationState;
use crate::world::Grid;

/// Snapshot the population of a world
pub fn collect_stats(world: &World) -> SimStats {
    let mut stats = SimStats {
        steps: world.get_resource::<SimulationState>().map_or(0, |s| s.steps),
        ..SimStats::default()
    };
    let Some(grid) = world.get_resource::<Grid>() else {
        return stats;
    };

    for &entity in grid.entities() {
        match world.get::<EntityKind>(entity) {
            Some(EntityKind::Treasure) => stats.treasures += 1,
            Some(EntityKind::Hunter) => {
                stats.hunters += 1;
                if world.get::<Hunter>(entity).is_some_and(Hunter::is_active) {
                    stats.active_hunters += 1;
                }
            }
            Some(EntityKind::Knight) => stats.knights += 1,
            Some(EntityKind::Hideout) => {
                stats.hideouts += 1;
                if let Some(hideout) = world.get::<Hideout>(entity) {
                    stats.collected_treasures += hideout.treasures.len();
                }
            }
            None => {}
        }
    }
    stats
}

//! Spawning and Removal
//!
//! Keeps ECS entities and grid registration in lock-step: nothing is spawned
//! unless its cell is free, and nothing leaves the grid without being
//! despawned (or having its state moved elsewhere first).

use bevy_ecs::prelude::*;
use eldoria_events::Position;

use super::grid::Grid;
use crate::components::Treasure;

/// Spawn `bundle` and place it at `pos`. Returns `None`, spawning nothing,
/// when the cell is occupied or off the grid.
pub fn spawn_at<B: Bundle>(world: &mut World, bundle: B, pos: Position) -> Option<Entity> {
    if !world.resource::<Grid>().is_empty(pos) {
        return None;
    }
    let entity = world.spawn(bundle).id();
    if world.resource_mut::<Grid>().add_entity(entity, pos) {
        Some(entity)
    } else {
        world.despawn(entity);
        None
    }
}

/// Remove whatever stands at `pos` from the grid and despawn it.
pub fn despawn_at(world: &mut World, pos: Position) -> bool {
    let Some(entity) = world.resource_mut::<Grid>().remove_entity(pos) else {
        return false;
    };
    world.despawn(entity)
}

/// Lift the treasure at `pos` off the grid, returning its state.
/// Leaves the grid untouched if the cell holds anything else.
pub fn take_treasure_at(world: &mut World, pos: Position) -> Option<Treasure> {
    let entity = world.resource::<Grid>().get_entity(pos)?;
    let treasure = world.get::<Treasure>(entity)?.clone();
    world.resource_mut::<Grid>().remove_entity(pos);
    world.despawn(entity);
    Some(treasure)
}

/// First free cell around `center` (dx outer, dy inner), if any
pub fn free_cell_near(grid: &Grid, center: Position) -> Option<Position> {
    grid.neighborhood(center, 1)
        .into_iter()
        .find(|pos| grid.is_empty(*pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EntityKind, TreasureBundle};
    use eldoria_events::TreasureType;

    fn world_with_grid(width: usize, height: usize) -> World {
        let mut world = World::new();
        world.insert_resource(Grid::new(width, height));
        world
    }

    #[test]
    fn test_spawn_at_checks_cell_first() {
        let mut world = world_with_grid(4, 4);
        let pos = Position::new(1, 2);
        let first = spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Gold)), pos);
        assert!(first.is_some());

        let second = spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Gold)), pos);
        assert!(second.is_none());
        assert_eq!(world.iter_entities().count(), 1);

        let entity = first.unwrap();
        assert_eq!(world.get::<EntityKind>(entity), Some(&EntityKind::Treasure));
        assert_eq!(world.resource::<Grid>().position_of(entity), Some(pos));
    }

    #[test]
    fn test_despawn_and_take() {
        let mut world = world_with_grid(4, 4);
        let a = Position::new(0, 0);
        let b = Position::new(3, 3);
        spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Bronze)), a);
        spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Silver).with_value(42.0)), b);

        assert!(despawn_at(&mut world, a));
        assert!(!despawn_at(&mut world, a));

        let taken = take_treasure_at(&mut world, b).unwrap();
        assert_eq!(taken.treasure_type, TreasureType::Silver);
        assert_eq!(taken.value, 42.0);
        assert!(world.resource::<Grid>().entities().is_empty());
        assert_eq!(world.iter_entities().count(), 0);
    }

    #[test]
    fn test_free_cell_near() {
        let mut world = world_with_grid(3, 3);
        let center = Position::new(1, 1);
        assert_eq!(free_cell_near(world.resource::<Grid>(), center), Some(Position::new(0, 0)));

        for pos in world.resource::<Grid>().neighborhood(center, 1) {
            spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Bronze)), pos);
        }
        assert_eq!(free_cell_near(world.resource::<Grid>(), center), None);
    }
}

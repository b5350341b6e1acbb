//! Movement
//!
//! One-cell moves shared by hunters and knights. These only relocate the
//! entity on the grid; stamina or energy accounting is the caller's job.

use bevy_ecs::prelude::*;
use eldoria_events::Position;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::Grid;

/// The four cardinal steps, in the order they are shuffled from
pub const CARDINALS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Next cell on the short way round from `from` to `target`.
///
/// Moves along x only when the x gap is strictly larger, otherwise along y.
/// Returns `from` itself when already on the target.
pub fn step_towards(grid: &Grid, from: Position, target: Position) -> Position {
    let (dx, dy) = grid.shortest_offset(from, target);
    if dx.abs() > dy.abs() {
        grid.offset(from, dx.signum(), 0)
    } else {
        grid.offset(from, 0, dy.signum())
    }
}

/// Move `entity` one cell toward `target` if that cell is free.
/// Returns true if the entity moved.
pub fn move_towards(world: &mut World, entity: Entity, target: Position) -> bool {
    let mut grid = world.resource_mut::<Grid>();
    let Some(from) = grid.position_of(entity) else {
        return false;
    };
    let next = step_towards(&grid, from, target);
    let moved = next != from && grid.move_entity(from, next);
    if moved {
        tracing::trace!(?entity, %from, %next, "stepped toward {}", target);
    }
    moved
}

/// Try the cardinal directions in random order and take the first free one.
/// Returns false, leaving the entity in place, when boxed in.
pub fn random_move<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) -> bool {
    let mut directions = CARDINALS;
    directions.shuffle(rng);

    let mut grid = world.resource_mut::<Grid>();
    let Some(from) = grid.position_of(entity) else {
        return false;
    };
    for (dx, dy) in directions {
        let to = grid.offset(from, dx, dy);
        if to != from && grid.move_entity(from, to) {
            tracing::trace!(?entity, %from, %to, "wandered");
            return true;
        }
    }
    false
}

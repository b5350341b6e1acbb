//! Hunter Behavior
//!
//! Fixed-priority state machine, one branch per tick:
//! collapse countdown, resting, seeking rest, then working (deliver cargo or
//! search for treasure). Only the working branch refreshes memory.

use bevy_ecs::prelude::*;
use eldoria_events::{Position, SimEventKind};
use rand::Rng;

use super::movement::{move_towards, random_move};
use super::perception::observe;
use super::update::emit;
use crate::components::{Hideout, Hunter, HunterMemory, Treasure};
use crate::config::{HunterConfig, SimConfig};
use crate::world::{take_treasure_at, Grid};

/// Run one tick of a hunter. Returns false when it has collapsed for good.
pub fn update_hunter<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) -> bool {
    let config = world.resource::<SimConfig>().hunter.clone();
    let Some(mut hunter) = world.get::<Hunter>(entity).cloned() else {
        return false;
    };

    let alive = run_hunter(world, entity, &mut hunter, &config, rng);

    if let Some(mut slot) = world.get_mut::<Hunter>(entity) {
        *slot = hunter;
    }
    alive
}

fn run_hunter<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    hunter: &mut Hunter,
    config: &HunterConfig,
    rng: &mut R,
) -> bool {
    if !hunter.is_active() {
        hunter.survival_steps += 1;
        return hunter.survival_steps <= config.grace_ticks;
    }

    if hunter.resting {
        hunter.rest(config);
        return true;
    }

    if hunter.stamina <= config.seek_rest_threshold {
        seek_rest(world, entity, hunter, config, rng);
        return true;
    }

    if hunter.carrying.is_some() {
        return_to_hideout(world, entity, hunter, config, rng);
    } else {
        search_for_treasure(world, entity, hunter, config, rng);
    }
    refresh_memory(world, entity, config.scan_radius);
    true
}

/// Head for the nearest remembered hideout and rest on arrival
fn seek_rest<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    hunter: &mut Hunter,
    config: &HunterConfig,
    rng: &mut R,
) {
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };
    match nearest_hideout(world, entity, here) {
        Some((target, _)) if world.resource::<Grid>().is_adjacent(here, target) => {
            hunter.resting = true;
            tracing::trace!(?entity, %here, "resting at hideout {}", target);
        }
        Some((target, _)) => {
            if move_towards(world, entity, target) {
                hunter.spend_move(config);
            }
        }
        None => {
            if random_move(world, entity, rng) {
                hunter.spend_move(config);
            }
        }
    }
}

/// Carry cargo home; deposit once the hideout is within reach
fn return_to_hideout<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    hunter: &mut Hunter,
    config: &HunterConfig,
    rng: &mut R,
) {
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };
    match nearest_hideout(world, entity, here) {
        Some((target, hideout)) if world.resource::<Grid>().is_adjacent(here, target) => {
            let Some(treasure) = hunter.carrying.take() else {
                return;
            };
            let (treasure_type, value) = (treasure.treasure_type, treasure.value);
            match world.get_mut::<Hideout>(hideout) {
                Some(mut store) => store.add_treasure(treasure),
                None => {
                    hunter.carrying = Some(treasure);
                    return;
                }
            }
            tracing::debug!(?entity, %here, value, "deposited {:?} at {}", treasure_type, target);
            emit(
                world,
                SimEventKind::TreasureDeposited {
                    hunter: here,
                    hideout: target,
                    treasure_type,
                    value,
                },
            );
        }
        Some((target, _)) => {
            if move_towards(world, entity, target) {
                hunter.spend_move(config);
            }
        }
        None => {
            if random_move(world, entity, rng) {
                hunter.spend_move(config);
            }
        }
    }
}

/// Pick up a treasure within reach, or move toward the best one remembered
fn search_for_treasure<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    hunter: &mut Hunter,
    config: &HunterConfig,
    rng: &mut R,
) {
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };

    if let Some(spot) = best_treasure_within_reach(world, here) {
        if let Some(treasure) = take_treasure_at(world, spot) {
            tracing::debug!(?entity, %here, value = treasure.value, "picked up {:?} at {}", treasure.treasure_type, spot);
            emit(
                world,
                SimEventKind::TreasurePickedUp {
                    hunter: here,
                    treasure: spot,
                    treasure_type: treasure.treasure_type,
                    value: treasure.value,
                },
            );
            hunter.carrying = Some(treasure);
            return;
        }
    }

    let moved = match best_remembered_treasure(world, entity) {
        Some(target) => move_towards(world, entity, target),
        None => random_move(world, entity, rng),
    };
    if moved {
        hunter.spend_move(config);
    }
}

/// Replace a hunter's memory with what it can see from where it stands
pub fn refresh_memory(world: &mut World, entity: Entity, radius: i64) {
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };
    let memory = observe(world, here, radius);
    if let Some(mut slot) = world.get_mut::<HunterMemory>(entity) {
        *slot = memory;
    }
}

/// Nearest remembered hideout that still stands where it was seen.
/// Ties keep the first in position order.
fn nearest_hideout(world: &World, entity: Entity, here: Position) -> Option<(Position, Entity)> {
    let grid = world.resource::<Grid>();
    let memory = world.get::<HunterMemory>(entity)?;

    let mut best: Option<(Position, Entity, f64)> = None;
    for (&pos, &hideout) in &memory.hideouts {
        if grid.get_entity(pos) != Some(hideout) || world.get::<Hideout>(hideout).is_none() {
            continue;
        }
        let distance = grid.distance(here, pos);
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((pos, hideout, distance));
        }
    }
    best.map(|(pos, hideout, _)| (pos, hideout))
}

/// Most valuable treasure in the eight surrounding cells; first maximum in
/// scan order wins ties.
fn best_treasure_within_reach(world: &World, here: Position) -> Option<Position> {
    let grid = world.resource::<Grid>();
    let mut best: Option<(Position, f64)> = None;
    for pos in grid.neighborhood(here, 1) {
        let Some(value) = grid
            .get_entity(pos)
            .and_then(|e| world.get::<Treasure>(e))
            .map(|t| t.value)
        else {
            continue;
        };
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Highest-value remembered treasure still lying where it was seen
fn best_remembered_treasure(world: &World, entity: Entity) -> Option<Position> {
    let grid = world.resource::<Grid>();
    let memory = world.get::<HunterMemory>(entity)?;

    let mut best: Option<(Position, f64)> = None;
    for (&pos, &treasure) in &memory.treasures {
        if grid.get_entity(pos) != Some(treasure) {
            continue;
        }
        let Some(value) = world.get::<Treasure>(treasure).map(|t| t.value) else {
            continue;
        };
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

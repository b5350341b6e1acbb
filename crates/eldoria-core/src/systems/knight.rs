//! Knight Behavior
//!
//! Knights patrol at random, chase the first hunter they spot and rest in
//! place when their energy runs low.

use bevy_ecs::prelude::*;
use eldoria_events::{CatchOutcome, SimEventKind};
use rand::Rng;

use super::movement::{move_towards, random_move};
use super::perception::scan;
use super::update::emit;
use crate::components::{EntityKind, Hunter, Knight};
use crate::config::{KnightConfig, SimConfig};
use crate::world::Grid;

/// Run one tick of a knight. Knights never leave the grid.
pub fn update_knight<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) -> bool {
    let config = world.resource::<SimConfig>().knight.clone();
    let Some(mut knight) = world.get::<Knight>(entity).cloned() else {
        return false;
    };

    run_knight(world, entity, &mut knight, &config, rng);

    if let Some(mut slot) = world.get_mut::<Knight>(entity) {
        *slot = knight;
    }
    true
}

fn run_knight<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    knight: &mut Knight,
    config: &KnightConfig,
    rng: &mut R,
) {
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };

    if !knight.resting && knight.energy <= config.retreat_threshold {
        knight.resting = true;
        tracing::debug!(?entity, %here, energy = knight.energy, "knight retreats");
        emit(world, SimEventKind::KnightRetreated { position: here });
        return;
    }

    if knight.resting {
        knight.recover(config);
        return;
    }

    let target = scan(world, here, config.detection_radius)
        .into_iter()
        .find(|s| s.kind == EntityKind::Hunter);

    match target {
        Some(sighting) => chase(world, entity, sighting.entity, knight, config, rng),
        None => {
            random_move(world, entity, rng);
        }
    }
}

/// Close in on a hunter and deal with it once within reach
fn chase<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    target: Entity,
    knight: &mut Knight,
    config: &KnightConfig,
    rng: &mut R,
) {
    let Some(prey_at) = world.resource::<Grid>().position_of(target) else {
        return;
    };
    let Some(here) = world.resource::<Grid>().position_of(entity) else {
        return;
    };

    if !world.resource::<Grid>().is_adjacent(here, prey_at) {
        move_towards(world, entity, prey_at);
    }
    knight.spend_chase(config);

    let here = world.resource::<Grid>().position_of(entity).unwrap_or(here);
    if world.resource::<Grid>().is_adjacent(here, prey_at) {
        interact(world, here, target, config, rng);
    }
}

/// Detain or challenge a caught hunter
fn interact<R: Rng + ?Sized>(
    world: &mut World,
    knight_at: eldoria_events::Position,
    target: Entity,
    config: &KnightConfig,
    rng: &mut R,
) {
    let Some(hunter_at) = world.resource::<Grid>().position_of(target) else {
        return;
    };
    let (outcome, penalty) = if rng.gen_bool(config.detain_probability) {
        (CatchOutcome::Detain, config.detain_penalty)
    } else {
        (CatchOutcome::Challenge, config.challenge_penalty)
    };

    let Some(mut hunter) = world.get_mut::<Hunter>(target) else {
        return;
    };
    let cargo_lost = hunter.suffer_penalty(penalty);

    tracing::debug!(%knight_at, %hunter_at, ?outcome, cargo_lost, "hunter caught");
    emit(
        world,
        SimEventKind::HunterCaught {
            knight: knight_at,
            hunter: hunter_at,
            outcome,
            cargo_lost,
        },
    );
}

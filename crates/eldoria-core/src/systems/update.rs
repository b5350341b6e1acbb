//! Tick Loop
//!
//! One tick visits every entity that was registered when the tick began, in
//! registration order. Entities spawned mid-tick wait for the next tick;
//! entities removed mid-tick (picked up, collapsed) are skipped.

use bevy_ecs::prelude::*;
use eldoria_events::{SimEvent, SimEventKind};
use rand::Rng;

use super::{hideout, hunter, knight, treasure};
use crate::components::{EntityKind, Hunter, Treasure};
use crate::world::{despawn_at, Grid};
use crate::SimRng;

/// Resource: global simulation progress
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationState {
    /// Completed ticks
    pub steps: u64,
}

/// Resource: events raised during the current tick
#[derive(Resource, Debug, Clone, Default)]
pub struct TickEvents {
    tick: u64,
    events: Vec<SimEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting for `tick`, dropping the previous tick's events
    pub fn begin(&mut self, tick: u64) {
        self.tick = tick;
        self.events.clear();
    }

    pub fn push(&mut self, kind: SimEventKind) {
        self.events.push(SimEvent::new(self.tick, kind));
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Record an event if the world collects them
pub fn emit(world: &mut World, kind: SimEventKind) {
    if let Some(mut events) = world.get_resource_mut::<TickEvents>() {
        events.push(kind);
    }
}

/// System: open the event buffer for the tick about to run
pub fn begin_tick(state: Res<SimulationState>, mut events: ResMut<TickEvents>) {
    events.begin(state.steps + 1);
}

/// System: run every entity's behavior once
pub fn update_entities(world: &mut World) {
    let snapshot: Vec<Entity> = world.resource::<Grid>().entities().to_vec();
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        for entity in snapshot {
            update_entity(world, entity, &mut rng.0);
        }
    });
}

/// System: count the finished tick
pub fn advance_step(mut state: ResMut<SimulationState>) {
    state.steps += 1;
}

/// Run one entity's behavior and retire it if the behavior says so.
/// Returns false if the entity is no longer on the grid afterwards.
pub fn update_entity<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) -> bool {
    if !world.resource::<Grid>().contains(entity) {
        return false;
    }
    let Some(kind) = world.get::<EntityKind>(entity).copied() else {
        return false;
    };

    let alive = match kind {
        EntityKind::Treasure => treasure::update_treasure(world, entity),
        EntityKind::Hunter => hunter::update_hunter(world, entity, rng),
        EntityKind::Knight => knight::update_knight(world, entity, rng),
        EntityKind::Hideout => hideout::update_hideout(world, entity, rng),
    };

    if !alive {
        retire(world, entity, kind);
    }
    alive
}

/// Remove an entity from wherever it stands now
fn retire(world: &mut World, entity: Entity, kind: EntityKind) {
    let Some(position) = world.resource::<Grid>().position_of(entity) else {
        return;
    };

    let event = match kind {
        EntityKind::Treasure => world
            .get::<Treasure>(entity)
            .map(|t| SimEventKind::TreasureDecayed { position, treasure_type: t.treasure_type }),
        EntityKind::Hunter => world
            .get::<Hunter>(entity)
            .map(|h| SimEventKind::HunterCollapsed { position, skill: h.skill }),
        EntityKind::Knight | EntityKind::Hideout => None,
    };
    if let Some(event) = event {
        tracing::debug!(?entity, %position, "{} removed", event.label());
        emit(world, event);
    }

    despawn_at(world, position);
}

//! Simulation Driver
//!
//! Owns the ECS world and the per-tick schedule:
//! begin tick -> update entities -> advance step.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use eldoria_events::{SimEvent, SimStats};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::output::{collect_stats, render_grid};
use crate::setup::{create_world, populate, SeedSummary};
use crate::systems::{advance_step, begin_tick, update_entities, SimulationState, TickEvents};
use crate::world::Grid;
use crate::SimRng;

/// A seeded treasure-hunt world and the schedule that advances it
pub struct Simulation {
    world: World,
    schedule: Schedule,
    initial: SeedSummary,
}

impl Simulation {
    /// Default configuration, entropy-seeded
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        Self::from_config(width, height, SimConfig::default(), None)
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, SimError> {
        Self::from_config(width, height, SimConfig::default(), Some(seed))
    }

    /// Build and populate a world. `None` seeds from entropy.
    pub fn from_config(
        width: usize,
        height: usize,
        config: SimConfig,
        seed: Option<u64>,
    ) -> Result<Self, SimError> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut world = create_world(width, height, config, rng)?;
        let initial = world.resource_scope(|world, mut rng: Mut<SimRng>| populate(world, &mut rng.0))?;
        Ok(Self::assemble(world, initial))
    }

    /// Wrap a hand-built world, e.g. one from [`Simulation::empty_world`]
    /// with entities placed by the caller.
    pub fn from_world(mut world: World) -> Result<Self, SimError> {
        if !world.contains_resource::<Grid>() {
            return Err(SimError::MissingResource("Grid"));
        }
        if !world.contains_resource::<SimRng>() {
            return Err(SimError::MissingResource("SimRng"));
        }
        match world.get_resource::<SimConfig>() {
            Some(config) => config.validate()?,
            None => return Err(SimError::MissingResource("SimConfig")),
        }
        if !world.contains_resource::<SimulationState>() {
            world.insert_resource(SimulationState::default());
        }
        if !world.contains_resource::<TickEvents>() {
            world.insert_resource(TickEvents::new());
        }

        let stats = collect_stats(&world);
        let initial = SeedSummary {
            hideouts: stats.hideouts,
            hunters: stats.hunters,
            treasures: stats.treasures,
            knights: stats.knights,
        };
        Ok(Self::assemble(world, initial))
    }

    /// An unpopulated world with every resource in place
    pub fn empty_world(width: usize, height: usize, seed: u64) -> Result<World, SimError> {
        create_world(width, height, SimConfig::default(), SmallRng::seed_from_u64(seed))
    }

    fn assemble(world: World, initial: SeedSummary) -> Self {
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((begin_tick, update_entities, advance_step).chain());

        Self {
            world,
            schedule,
            initial,
        }
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.schedule.run(&mut self.world);
        tracing::trace!(
            step = self.steps(),
            events = self.tick_events().len(),
            "tick complete"
        );
    }

    /// True while treasure remains and some hunter can still move
    pub fn is_running(&self) -> bool {
        let stats = self.stats();
        stats.treasures > 0 && stats.active_hunters > 0
    }

    pub fn stats(&self) -> SimStats {
        collect_stats(&self.world)
    }

    /// Step until finished or `max_steps` ticks have run (0 means no limit).
    /// Returns the number of ticks taken.
    pub fn run(&mut self, max_steps: u64) -> u64 {
        let mut taken = 0;
        while self.is_running() && (max_steps == 0 || taken < max_steps) {
            self.step();
            taken += 1;
        }
        let stats = self.stats();
        tracing::info!(
            steps = stats.steps,
            collected = stats.collected_treasures,
            treasures = stats.treasures,
            active_hunters = stats.active_hunters,
            "run finished after {} ticks",
            taken
        );
        taken
    }

    pub fn steps(&self) -> u64 {
        self.world.resource::<SimulationState>().steps
    }

    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    /// Text rendering of the grid
    pub fn display(&self) -> String {
        render_grid(&self.world)
    }

    /// Events raised during the most recent tick
    pub fn tick_events(&self) -> &[SimEvent] {
        self.world.resource::<TickEvents>().events()
    }

    /// Population placed at seeding time
    pub fn initial_population(&self) -> SeedSummary {
        self.initial
    }
}

//! Eldoria Simulation Engine
//!
//! Treasure hunters, knights and hideouts on a wrap-around grid. Entities
//! live in a `bevy_ecs` world; a single-threaded schedule advances it one
//! tick at a time.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{ConfigError, SimConfig, DEFAULT_TUNING_PATH};
pub use error::SimError;
pub use output::{collect_stats, render_grid, EventLogger};
pub use setup::{create_world, populate, SeedSummary};
pub use simulation::Simulation;
pub use world::Grid;

pub use eldoria_events::{
    CatchOutcome, HunterSkill, Position, SimEvent, SimEventKind, SimStats, TreasureType,
};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

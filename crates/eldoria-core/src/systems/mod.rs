//! ECS Systems
//!
//! Per-entity behaviors and the tick loop that dispatches them.

pub mod hideout;
pub mod hunter;
pub mod knight;
pub mod movement;
pub mod perception;
pub mod treasure;
pub mod update;

// Re-export commonly used systems
pub use hideout::update_hideout;
pub use hunter::{refresh_memory, update_hunter};
pub use knight::update_knight;
pub use movement::{move_towards, random_move, step_towards, CARDINALS};
pub use perception::{observe, scan, Sighting};
pub use treasure::update_treasure;
pub use update::{
    advance_step, begin_tick, emit, update_entities, update_entity, SimulationState, TickEvents,
};

//! Shared data types for the Eldoria treasure-hunt simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine in `eldoria-core` and any front end (CLI, viewer, log
//! consumer) depend on it.

pub mod event;
pub mod stats;
pub mod types;

// Re-export grid/entity tags
pub use types::{HunterSkill, Position, TreasureType};

// Re-export event types
pub use event::{CatchOutcome, SimEvent, SimEventKind};

// Re-export stats
pub use stats::SimStats;

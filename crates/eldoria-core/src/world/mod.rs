//! World Model
//!
//! The toroidal grid and the helpers that keep it in step with the ECS world.

pub mod grid;
pub mod spawn;

pub use grid::*;
pub use spawn::*;

//! World Setup
//!
//! Resource initialization and initial population.

pub mod world;

pub use world::*;

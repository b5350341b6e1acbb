//! ECS Components
//!
//! Entity components for treasures, hunters, knights and hideouts.

pub mod hideout;
pub mod hunter;
pub mod kind;
pub mod knight;
pub mod treasure;

pub use hideout::*;
pub use hunter::*;
pub use kind::*;
pub use knight::*;
pub use treasure::*;

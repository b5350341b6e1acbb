//! Aggregate Statistics
//!
//! Population counts derived by scanning the grid.

use serde::{Deserialize, Serialize};

/// Counts reported by `Simulation::stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Ticks completed so far
    pub steps: u64,
    /// Hunters on the grid, collapsing ones included
    pub hunters: usize,
    /// Hunters with stamina left
    pub active_hunters: usize,
    pub knights: usize,
    /// Treasures still lying on the grid
    pub treasures: usize,
    /// Treasures deposited in hideouts
    pub collected_treasures: usize,
    pub hideouts: usize,
}

impl SimStats {
    /// Hunters at zero stamina, counting down their grace period
    pub fn exhausted_hunters(&self) -> usize {
        self.hunters - self.active_hunters
    }
}

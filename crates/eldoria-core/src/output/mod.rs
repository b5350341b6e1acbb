//! Output
//!
//! Statistics, text rendering and the JSONL event log.

pub mod display;
pub mod logger;
pub mod stats;

pub use display::render_grid;
pub use logger::EventLogger;
pub use stats::collect_stats;

//! Error Types

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building or driving a simulation
#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("no empty cell left on the {width}x{height} grid to place a {what}")]
    GridSaturated {
        width: usize,
        height: usize,
        what: &'static str,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("world is missing the {0} resource")]
    MissingResource(&'static str),
}

//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every section falls back to its defaults, so a file only needs the keys it changes.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub treasure: TreasureConfig,
    pub hunter: HunterConfig,
    pub knight: KnightConfig,
    pub hideout: HideoutConfig,
}

/// World seeding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub min_hideouts: usize,
    pub max_hideouts: usize,
    pub min_hunters_per_hideout: usize,
    pub max_hunters_per_hideout: usize,
    /// Fraction of cells seeded with treasure (lower bound)
    pub min_treasure_density: f64,
    /// Fraction of cells seeded with treasure (upper bound)
    pub max_treasure_density: f64,
    /// Knights per hunter (lower bound); at least one knight is always placed
    pub min_knight_ratio: f64,
    pub max_knight_ratio: f64,
    /// Random probes before falling back to an exhaustive empty-cell scan
    pub placement_attempts: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_hideouts: 3,
            max_hideouts: 5,
            min_hunters_per_hideout: 1,
            max_hunters_per_hideout: 3,
            min_treasure_density: 0.15,
            max_treasure_density: 0.25,
            min_knight_ratio: 0.05,
            max_knight_ratio: 0.10,
            placement_attempts: 64,
        }
    }
}

/// Treasure decay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasureConfig {
    pub initial_value: f64,
    /// Multiplier applied to the value every tick
    pub decay_factor: f64,
    /// A treasure is removed once its value is at or below this
    pub removal_threshold: f64,
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            initial_value: 100.0,
            decay_factor: 0.999,
            removal_threshold: 0.1,
        }
    }
}

/// Hunter stamina and perception parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    pub max_stamina: f64,
    pub move_cost: f64,
    pub rest_regen: f64,
    /// Resting ends once stamina reaches this
    pub rest_resume_threshold: f64,
    /// At or below this a hunter heads for a hideout
    pub seek_rest_threshold: f64,
    /// Ticks a hunter survives at zero stamina
    pub grace_ticks: u32,
    pub scan_radius: i64,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            max_stamina: 100.0,
            move_cost: 2.0,
            rest_regen: 1.0,
            rest_resume_threshold: 80.0,
            seek_rest_threshold: 6.0,
            grace_ticks: 3,
            scan_radius: 3,
        }
    }
}

/// Knight energy and interaction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnightConfig {
    pub max_energy: f64,
    pub chase_cost: f64,
    pub rest_regen: f64,
    /// At or below this a knight stops to rest
    pub retreat_threshold: f64,
    pub detection_radius: i64,
    /// Chance that a catch is a detain rather than a challenge
    pub detain_probability: f64,
    pub detain_penalty: f64,
    pub challenge_penalty: f64,
}

impl Default for KnightConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            chase_cost: 20.0,
            rest_regen: 10.0,
            retreat_threshold: 20.0,
            detection_radius: 3,
            detain_probability: 0.5,
            detain_penalty: 5.0,
            challenge_penalty: 20.0,
        }
    }
}

/// Hideout roster parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideoutConfig {
    pub capacity: usize,
    pub recruit_probability: f64,
    /// Residents needed before recruiting
    pub min_residents_to_recruit: usize,
    /// Distinct skills among residents needed before recruiting
    pub min_distinct_skills: usize,
}

impl Default for HideoutConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            recruit_probability: 0.2,
            min_residents_to_recruit: 2,
            min_distinct_skills: 2,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject values the tick loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        ensure_ordered("world.*_hideouts", w.min_hideouts as f64, w.max_hideouts as f64)?;
        ensure_ordered(
            "world.*_hunters_per_hideout",
            w.min_hunters_per_hideout as f64,
            w.max_hunters_per_hideout as f64,
        )?;
        ensure_unit("world.min_treasure_density", w.min_treasure_density)?;
        ensure_unit("world.max_treasure_density", w.max_treasure_density)?;
        ensure_ordered(
            "world.*_treasure_density",
            w.min_treasure_density,
            w.max_treasure_density,
        )?;
        ensure_ordered("world.*_knight_ratio", w.min_knight_ratio, w.max_knight_ratio)?;
        if w.min_knight_ratio < 0.0 {
            return Err(ConfigError::Invalid(
                "world.min_knight_ratio must not be negative".to_string(),
            ));
        }

        // On-grid treasure must always expire
        let t = &self.treasure;
        if !(t.decay_factor > 0.0 && t.decay_factor < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "treasure.decay_factor must be in (0, 1), got {}",
                t.decay_factor
            )));
        }
        ensure_positive("treasure.removal_threshold", t.removal_threshold)?;
        ensure_positive("treasure.initial_value", t.initial_value)?;

        let h = &self.hunter;
        ensure_positive("hunter.max_stamina", h.max_stamina)?;
        ensure_non_negative("hunter.move_cost", h.move_cost)?;
        ensure_positive("hunter.rest_regen", h.rest_regen)?;
        ensure_within("hunter.rest_resume_threshold", h.rest_resume_threshold, h.max_stamina)?;
        ensure_within("hunter.seek_rest_threshold", h.seek_rest_threshold, h.max_stamina)?;

        let k = &self.knight;
        ensure_positive("knight.max_energy", k.max_energy)?;
        ensure_non_negative("knight.chase_cost", k.chase_cost)?;
        ensure_positive("knight.rest_regen", k.rest_regen)?;
        ensure_within("knight.retreat_threshold", k.retreat_threshold, k.max_energy)?;
        ensure_non_negative("knight.detain_penalty", k.detain_penalty)?;
        ensure_non_negative("knight.challenge_penalty", k.challenge_penalty)?;

        if self.hunter.scan_radius < 0 || self.knight.detection_radius < 0 {
            return Err(ConfigError::Invalid("radii must not be negative".to_string()));
        }

        ensure_unit("knight.detain_probability", self.knight.detain_probability)?;
        ensure_unit("hideout.recruit_probability", self.hideout.recruit_probability)?;
        if self.hideout.capacity == 0 {
            return Err(ConfigError::Invalid("hideout.capacity must be positive".to_string()));
        }
        if w.max_hunters_per_hideout > self.hideout.capacity {
            return Err(ConfigError::Invalid(format!(
                "world.max_hunters_per_hideout ({}) exceeds hideout.capacity ({})",
                w.max_hunters_per_hideout, self.hideout.capacity
            )));
        }
        Ok(())
    }
}

fn ensure_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")))
    }
}

/// `value` must lie in `[0, max]`
fn ensure_within(name: &str, value: f64, max: f64) -> Result<(), ConfigError> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be within [0, {max}], got {value}")))
    }
}

fn ensure_ordered(name: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name}: minimum {min} exceeds maximum {max}")))
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

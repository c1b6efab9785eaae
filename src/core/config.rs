//! Run configuration with documented constants
//!
//! All tuning values are collected here. Definition tables (resources,
//! upgrades) live in their own catalogs; this is the engine-level knobs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Island generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Chance in [0,1] that an eligible cell spawns a resource node
    pub resource_density: f32,
    /// Biome tag recorded in saves
    pub biome: String,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            resource_density: 0.12,
            biome: "island.tropical".to_string(),
        }
    }
}

/// Storm hazard tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Chance per tick that a storm hits
    pub probability: f64,
    /// Smallest amount a storm can strip from a resource
    pub min_loss: f32,
    /// Largest amount a storm can strip from a resource
    pub max_loss: f32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            probability: 0.03,
            min_loss: 2.0,
            max_loss: 10.0,
        }
    }
}

/// Escape attempt pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// Resource bundle consumed by one attempt, resource id -> amount
    pub cost: BTreeMap<String, f32>,
    /// Progress gained per successful attempt; reaching 1.0 wins the run
    pub progress_per_attempt: f32,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        let mut cost = BTreeMap::new();
        cost.insert("resource.wood".to_string(), 30.0);
        cost.insert("resource.food".to_string(), 20.0);
        cost.insert("resource.scrap".to_string(), 10.0);
        Self {
            cost,
            progress_per_attempt: 0.2,
        }
    }
}

/// Top-level engine configuration
///
/// Immutable after bootstrap; the only runtime knob is the speed
/// multiplier, which must come from `speed_levels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub island: IslandConfig,
    /// Real seconds per tick at speed 1.0
    pub tick_interval_secs: f32,
    /// Autosave cadence in ticks (values below 1 clamp up to 1)
    pub autosave_every_n_ticks: u32,
    /// Speed multipliers the front end may cycle through
    pub speed_levels: Vec<f32>,
    /// Maximum Euclidean distance from spawn a node can be harvested at
    pub gather_radius: f32,
    /// Per-resource starting amount overrides (ids absent here use the
    /// definition's starting amount)
    pub starting_amounts: AHashMap<String, f32>,
    pub storm: StormConfig,
    pub escape: EscapeConfig,
    /// Where the single save slot lives
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            island: IslandConfig::default(),
            tick_interval_secs: 1.0,
            autosave_every_n_ticks: 30,
            speed_levels: vec![1.0, 2.0, 4.0],
            gather_radius: 12.0,
            starting_amounts: AHashMap::new(),
            storm: StormConfig::default(),
            escape: EscapeConfig::default(),
            save_path: PathBuf::from("saves/castaway.json"),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML override file; missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate for internal consistency; configuration errors are not
    /// recoverable mid-run, so bootstrap fails fast on them.
    pub fn validate(&self) -> Result<()> {
        if self.island.width == 0 || self.island.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "island dimensions must be positive (got {}x{})",
                self.island.width, self.island.height
            )));
        }
        if !(0.0..=1.0).contains(&self.island.resource_density) {
            return Err(GameError::InvalidConfig(format!(
                "resource_density must be in [0,1] (got {})",
                self.island.resource_density
            )));
        }
        if self.tick_interval_secs <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "tick_interval_secs must be positive (got {})",
                self.tick_interval_secs
            )));
        }
        if self.speed_levels.is_empty() {
            return Err(GameError::InvalidConfig(
                "speed_levels must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self.speed_levels.iter().find(|s| **s <= 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "speed levels must be positive (got {})",
                bad
            )));
        }
        if self.gather_radius <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "gather_radius must be positive (got {})",
                self.gather_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.storm.probability) {
            return Err(GameError::InvalidConfig(format!(
                "storm probability must be in [0,1] (got {})",
                self.storm.probability
            )));
        }
        if self.storm.min_loss < 0.0 || self.storm.max_loss < self.storm.min_loss {
            return Err(GameError::InvalidConfig(format!(
                "storm loss range is invalid ({}..{})",
                self.storm.min_loss, self.storm.max_loss
            )));
        }
        if self.escape.progress_per_attempt <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "escape progress_per_attempt must be positive (got {})",
                self.escape.progress_per_attempt
            )));
        }
        if let Some((id, amt)) = self.escape.cost.iter().find(|(_, amt)| **amt < 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "escape cost for {} must not be negative (got {})",
                id, amt
            )));
        }
        Ok(())
    }
}

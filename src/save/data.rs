//! Save-format structs
//!
//! The document is self-contained JSON. `world` deserializes as an
//! `Option` so a payload that parses but predates the world-generation
//! schema is caught by validation instead of crashing a load. Resource
//! amounts use a `BTreeMap` so repeated saves of the same state are
//! byte-identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::island::generator::{IslandData, ResourceNode};
use crate::island::terrain::Terrain;

/// Bumped when the persisted shape changes; loads reject other versions
pub const SAVE_VERSION: u32 = 1;

/// Top-level persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub schema_version: u32,
    pub run: RunState,
}

/// One run's full simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub tick: Tick,
    pub player: PlayerState,
    #[serde(default)]
    pub world: Option<WorldState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Resource amounts at save time, keyed by resource id
    pub resources: BTreeMap<String, f32>,
    pub escape_progress: f32,
    /// Owned upgrades in purchase order (re-applied in this order on load)
    #[serde(default)]
    pub upgrades: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub seed: u64,
    pub biome: String,
    pub width: u32,
    pub height: u32,
    pub spawn_x: u32,
    pub spawn_y: u32,
    pub terrain: Vec<Terrain>,
    pub nodes: Vec<ResourceNode>,
}

impl WorldState {
    pub fn from_island(data: &IslandData, live_nodes: &[ResourceNode]) -> Self {
        Self {
            seed: data.seed,
            biome: data.biome.clone(),
            width: data.width,
            height: data.height,
            spawn_x: data.spawn_x,
            spawn_y: data.spawn_y,
            terrain: data.terrain.clone(),
            nodes: live_nodes.to_vec(),
        }
    }

    pub fn into_island(self) -> IslandData {
        IslandData {
            seed: self.seed,
            biome: self.biome,
            width: self.width,
            height: self.height,
            spawn_x: self.spawn_x,
            spawn_y: self.spawn_y,
            terrain: self.terrain,
            nodes: self.nodes,
        }
    }
}

/// A structurally validated save, ready to restore
#[derive(Debug, Clone)]
pub struct LoadedRun {
    pub tick: Tick,
    pub player: PlayerState,
    pub world: WorldState,
}

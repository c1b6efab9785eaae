//! Seeded island generation
//!
//! Terrain comes from a radial falloff perturbed by coherent noise; node
//! placement runs on an independent RNG stream so the two stages cannot
//! disturb each other's draw order. Same seed + config reproduces the
//! terrain grid and node list exactly.

use serde::{Deserialize, Serialize};

use crate::core::config::IslandConfig;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;
use crate::core::types::GridPos;
use crate::island::noise;
use crate::island::terrain::Terrain;
use crate::resources::definitions::ResourceCatalog;

/// Distance beyond which a cell is open ocean
const OCEAN_THRESHOLD: f32 = 1.0;
/// Distance band between beach and the interior
const BEACH_THRESHOLD: f32 = 0.75;
/// Detail-noise threshold for rocky outcrops
const ROCKY_THRESHOLD: f32 = 0.65;
/// Detail-noise threshold for forest
const FOREST_THRESHOLD: f32 = 0.40;
/// How strongly shape noise warps the radial falloff
const COAST_JITTER: f32 = 0.3;

/// Feature size of the island outline
const SHAPE_FREQUENCY: f32 = 0.08;
/// Feature size of the vegetation/rock detail field
const DETAIL_FREQUENCY: f32 = 0.15;

/// Salt for the node-placement RNG stream
const NODE_SEED_SALT: u64 = 0xBEEF;

/// Node starting amounts are drawn uniformly from this range
const NODE_AMOUNT_MIN: f32 = 20.0;
const NODE_AMOUNT_MAX: f32 = 50.0;

/// A depletable deposit of one resource type at a grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub resource_id: String,
    pub x: u32,
    pub y: u32,
    pub amount: f32,
    pub max_amount: f32,
}

/// Immutable generation record for one island
///
/// Terrain is stored flat, row-major, indexed `y * width + x`. This is
/// the template the runtime grid copies from; nothing mutates it after
/// generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandData {
    pub seed: u64,
    pub biome: String,
    pub width: u32,
    pub height: u32,
    pub spawn_x: u32,
    pub spawn_y: u32,
    pub terrain: Vec<Terrain>,
    pub nodes: Vec<ResourceNode>,
}

impl IslandData {
    pub fn spawn(&self) -> GridPos {
        GridPos::new(self.spawn_x, self.spawn_y)
    }
}

pub struct WorldGenerator;

impl WorldGenerator {
    /// Generate an island from a seed and config.
    ///
    /// Fails fast on degenerate dimensions or an out-of-range density;
    /// a silently empty world would be worse than an error here.
    pub fn generate(
        seed: u64,
        config: &IslandConfig,
        catalog: &ResourceCatalog,
    ) -> Result<IslandData> {
        if config.width == 0 || config.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "island dimensions must be positive (got {}x{})",
                config.width, config.height
            )));
        }
        if !(0.0..=1.0).contains(&config.resource_density) {
            return Err(GameError::InvalidConfig(format!(
                "resource_density must be in [0,1] (got {})",
                config.resource_density
            )));
        }

        // Two independent noise fields: island shape and terrain detail.
        // Low and high slices of the seed keep them decorrelated; the
        // detail offset folds the low word back in so small seeds still
        // shift both fields.
        let shape_offset = seed & 0xFFFF_FFFF;
        let detail_offset = (seed >> 32) ^ (seed << 32) ^ 0x9E37;

        let width = config.width;
        let height = config.height;
        let center_x = (width / 2) as f32;
        let center_y = (height / 2) as f32;
        let radius = width.min(height) as f32 / 2.0;

        let mut terrain = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - center_x;
                let dy = y as f32 - center_y;
                let dist = (dx * dx + dy * dy).sqrt() / radius;

                let shape = noise::sample(x as f32, y as f32, shape_offset, SHAPE_FREQUENCY);
                let warped = dist + (shape - 0.5) * COAST_JITTER;

                let cell = if warped > OCEAN_THRESHOLD {
                    Terrain::Ocean
                } else if warped > BEACH_THRESHOLD {
                    Terrain::Beach
                } else {
                    let detail =
                        noise::sample(x as f32, y as f32, detail_offset, DETAIL_FREQUENCY);
                    if detail > ROCKY_THRESHOLD {
                        Terrain::Rocky
                    } else if detail > FOREST_THRESHOLD {
                        Terrain::Forest
                    } else {
                        Terrain::Clearing
                    }
                };
                terrain.push(cell);
            }
        }

        // Spawn at the grid center (integer division keeps it on-cell)
        let spawn_x = width / 2;
        let spawn_y = height / 2;

        let nodes = Self::place_nodes(seed, config, catalog, &terrain, width, height);

        tracing::debug!(
            seed,
            width,
            height,
            nodes = nodes.len(),
            "Generated island"
        );

        Ok(IslandData {
            seed,
            biome: config.biome.clone(),
            width,
            height,
            spawn_x,
            spawn_y,
            terrain,
            nodes,
        })
    }

    /// Scan cells row-major and roll node placement on a dedicated RNG
    /// stream, so terrain changes never reorder node draws.
    fn place_nodes(
        seed: u64,
        config: &IslandConfig,
        catalog: &ResourceCatalog,
        terrain: &[Terrain],
        width: u32,
        height: u32,
    ) -> Vec<ResourceNode> {
        let mut rng = GameRng::from_seed(seed ^ NODE_SEED_SALT);
        let mut nodes = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let cell = terrain[(y * width + x) as usize];
                let Some(resource_id) = cell.resource_id() else {
                    continue;
                };
                if !rng.next_bool(config.resource_density as f64) {
                    continue;
                }
                let max_amount = catalog.node_max(resource_id);
                let amount = rng
                    .next_float(NODE_AMOUNT_MIN, NODE_AMOUNT_MAX)
                    .min(max_amount);
                nodes.push(ResourceNode {
                    resource_id: resource_id.to_string(),
                    x,
                    y,
                    amount,
                    max_amount,
                });
            }
        }

        nodes
    }
}

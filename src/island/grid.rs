//! Runtime island view with depletable node copies

use crate::core::types::GridPos;
use crate::island::generator::{IslandData, ResourceNode};
use crate::island::terrain::Terrain;

/// Runtime view over a generated island.
///
/// The generation record stays immutable so a loaded save's terrain and
/// nodes remain byte-identical to what was last persisted; gathering
/// depletes an independently owned copy of the node list, which gets
/// flushed back into the save snapshot.
#[derive(Debug, Clone)]
pub struct IslandGrid {
    data: IslandData,
    live_nodes: Vec<ResourceNode>,
}

impl IslandGrid {
    /// Wrap a generation record, deep-copying its nodes for play
    pub fn new(data: IslandData) -> Self {
        let live_nodes = data.nodes.clone();
        Self { data, live_nodes }
    }

    /// Pure range check
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.data.width as i64 && y < self.data.height as i64
    }

    /// Bounds-checked terrain lookup
    pub fn terrain_at(&self, x: i64, y: i64) -> Option<Terrain> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.data.terrain[(y as u32 * self.data.width + x as u32) as usize])
    }

    pub fn spawn(&self) -> GridPos {
        self.data.spawn()
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn seed(&self) -> u64 {
        self.data.seed
    }

    /// The immutable generation record
    pub fn data(&self) -> &IslandData {
        &self.data
    }

    /// Live, depletable nodes
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.live_nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [ResourceNode] {
        &mut self.live_nodes
    }
}

//! Nearest-node work assignment
//!
//! Each tick the castaway works the closest reachable deposit of every
//! resource type at once. Depleted nodes stay in the list at zero and
//! never regenerate; they just stop contributing.

use ahash::AHashMap;

use crate::core::types::GridPos;
use crate::island::grid::IslandGrid;
use crate::resources::ledger::ResourceLedger;

/// One harvest performed during a gather tick
#[derive(Debug, Clone, PartialEq)]
pub struct Harvest {
    pub resource_id: String,
    pub node_x: u32,
    pub node_y: u32,
    pub amount: f32,
}

/// Harvest the nearest non-empty node of each resource type within
/// `radius` (Euclidean, grid units) of the spawn point.
///
/// Equidistant nodes tie-break on scan order; a resource with no
/// reachable non-empty node simply yields nothing this tick.
pub fn tick_gather(
    grid: &mut IslandGrid,
    ledger: &mut ResourceLedger,
    radius: f32,
) -> Vec<Harvest> {
    let spawn = grid.spawn();

    // Nearest candidate per resource id; first-encountered wins ties
    let mut nearest: AHashMap<&str, (usize, f32)> = AHashMap::new();
    for (idx, node) in grid.nodes().iter().enumerate() {
        if node.amount <= 0.0 {
            continue;
        }
        let dist = spawn.distance(&GridPos::new(node.x, node.y));
        if dist > radius {
            continue;
        }
        match nearest.get(node.resource_id.as_str()) {
            Some((_, best)) if *best <= dist => {}
            _ => {
                nearest.insert(node.resource_id.as_str(), (idx, dist));
            }
        }
    }

    // Deplete in node order so the report is deterministic
    let mut selected: Vec<usize> = nearest.values().map(|(idx, _)| *idx).collect();
    selected.sort_unstable();

    let mut harvests = Vec::with_capacity(selected.len());
    for idx in selected {
        let resource_id = grid.nodes()[idx].resource_id.clone();
        let yield_per_tick =
            ledger.base_gather_rate(&resource_id) * ledger.gather_multiplier(&resource_id);
        let node = &mut grid.nodes_mut()[idx];
        let harvested = yield_per_tick.min(node.amount);
        if harvested <= 0.0 {
            continue;
        }
        node.amount -= harvested;
        let (node_x, node_y) = (node.x, node.y);
        ledger.add(&resource_id, harvested);
        harvests.push(Harvest {
            resource_id,
            node_x,
            node_y,
            amount: harvested,
        });
    }

    harvests
}

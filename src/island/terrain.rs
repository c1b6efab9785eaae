//! Terrain classification for generated island cells

use serde::{Deserialize, Serialize};

use crate::resources::definitions;

/// Terrain of one grid cell, fixed at generation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Ocean,
    Beach,
    Clearing,
    Forest,
    Rocky,
}

impl Terrain {
    /// Resource id this terrain can host a node for, if any
    pub fn resource_id(&self) -> Option<&'static str> {
        match self {
            Self::Forest => Some(definitions::WOOD),
            Self::Beach => Some(definitions::FOOD),
            Self::Rocky => Some(definitions::SCRAP),
            Self::Ocean | Self::Clearing => None,
        }
    }
}

//! Island world generation and the runtime grid

pub mod generator;
pub mod grid;
pub mod noise;
pub mod terrain;

pub use generator::{IslandData, ResourceNode, WorldGenerator};
pub use grid::IslandGrid;
pub use terrain::Terrain;

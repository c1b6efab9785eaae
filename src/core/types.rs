//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Integer coordinate on the island grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in grid units
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
        assert!((b.distance(&a) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GridPos::new(7, 11);
        assert_eq!(p.distance(&p), 0.0);
    }
}

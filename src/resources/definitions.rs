//! Resource definition tables
//!
//! Definitions are immutable value data constructed once at bootstrap and
//! shared read-only; no component may mutate one after load.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Stable ids for the built-in island resources
pub const WOOD: &str = "resource.wood";
pub const FOOD: &str = "resource.food";
pub const SCRAP: &str = "resource.scrap";

/// Fallback node capacity when a resource id has no definition
const DEFAULT_NODE_MAX: f32 = 50.0;

/// Immutable configuration for one resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDefinition {
    pub id: String,
    pub display_name: String,
    /// Amount a fresh run starts with (config may override per run)
    pub starting_amount: f32,
    /// Hard cap the ledger clamps to
    pub max_amount: f32,
    /// Passive gain applied every tick
    pub base_income_per_tick: f32,
    /// Passive loss applied every tick (spoilage, rot)
    pub decay_per_tick: f32,
    /// Harvest yield per tick from one node, before multipliers
    pub gather_rate_per_tick: f32,
    /// Capacity of a freshly generated node of this resource
    pub node_max_amount: f32,
}

impl Default for ResourceDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            starting_amount: 0.0,
            max_amount: 100.0,
            base_income_per_tick: 0.0,
            decay_per_tick: 0.0,
            gather_rate_per_tick: 1.0,
            node_max_amount: DEFAULT_NODE_MAX,
        }
    }
}

/// Wire format for a TOML definition file
#[derive(Debug, Deserialize)]
struct ResourceTable {
    #[serde(default)]
    resources: Vec<ResourceDefinition>,
}

/// Immutable, ordered table of resource definitions
///
/// Keeps declaration order for deterministic iteration (hazard rolls and
/// per-tick passes index into it), with a map for id lookup.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    defs: Vec<ResourceDefinition>,
    by_id: AHashMap<String, usize>,
}

impl ResourceCatalog {
    pub fn new(defs: Vec<ResourceDefinition>) -> Result<Self> {
        if defs.is_empty() {
            return Err(GameError::InvalidConfig(
                "resource definition table must not be empty".to_string(),
            ));
        }
        let mut by_id = AHashMap::with_capacity(defs.len());
        for (idx, def) in defs.iter().enumerate() {
            if def.id.is_empty() {
                return Err(GameError::InvalidConfig(
                    "resource definition has an empty id".to_string(),
                ));
            }
            if def.max_amount <= 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{}: max_amount must be positive (got {})",
                    def.id, def.max_amount
                )));
            }
            if by_id.insert(def.id.clone(), idx).is_some() {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate resource id: {}",
                    def.id
                )));
            }
        }
        Ok(Self { defs, by_id })
    }

    /// The built-in island resource table
    pub fn default_island() -> Self {
        Self::new(vec![
            ResourceDefinition {
                id: WOOD.to_string(),
                display_name: "Wood".to_string(),
                starting_amount: 0.0,
                max_amount: 200.0,
                gather_rate_per_tick: 1.0,
                ..ResourceDefinition::default()
            },
            ResourceDefinition {
                id: FOOD.to_string(),
                display_name: "Food".to_string(),
                starting_amount: 10.0,
                max_amount: 120.0,
                base_income_per_tick: 0.1,
                decay_per_tick: 0.25,
                gather_rate_per_tick: 1.5,
                ..ResourceDefinition::default()
            },
            ResourceDefinition {
                id: SCRAP.to_string(),
                display_name: "Scrap".to_string(),
                starting_amount: 0.0,
                max_amount: 150.0,
                gather_rate_per_tick: 0.5,
                ..ResourceDefinition::default()
            },
        ])
        .expect("built-in resource table is valid")
    }

    /// Parse a `[[resources]]` TOML table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: ResourceTable = toml::from_str(content)?;
        Self::new(table.resources)
    }

    pub fn get(&self, id: &str) -> Option<&ResourceDefinition> {
        self.by_id.get(id).map(|idx| &self.defs[*idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Definitions in declaration order
    pub fn defs(&self) -> &[ResourceDefinition] {
        &self.defs
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Node capacity for a resource, falling back for undefined ids
    pub fn node_max(&self, id: &str) -> f32 {
        self.get(id)
            .map(|def| def.node_max_amount)
            .unwrap_or(DEFAULT_NODE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_island_table() {
        let catalog = ResourceCatalog::default_island();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(WOOD));
        assert!(catalog.contains(FOOD));
        assert!(catalog.contains(SCRAP));
        assert_eq!(catalog.get(FOOD).unwrap().gather_rate_per_tick, 1.5);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(ResourceCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let def = ResourceDefinition {
            id: WOOD.to_string(),
            ..ResourceDefinition::default()
        };
        assert!(ResourceCatalog::new(vec![def.clone(), def]).is_err());
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
[[resources]]
id = "resource.wood"
display_name = "Wood"
max_amount = 200.0
gather_rate_per_tick = 1.0

[[resources]]
id = "resource.food"
display_name = "Food"
starting_amount = 10.0
max_amount = 120.0
decay_per_tick = 0.25
"#;
        let catalog = ResourceCatalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.len(), 2);
        let food = catalog.get("resource.food").unwrap();
        assert_eq!(food.starting_amount, 10.0);
        assert_eq!(food.decay_per_tick, 0.25);
        // Unspecified fields take the documented defaults
        assert_eq!(food.gather_rate_per_tick, 1.0);
        assert_eq!(food.node_max_amount, 50.0);
    }

    #[test]
    fn test_node_max_fallback() {
        let catalog = ResourceCatalog::default_island();
        assert_eq!(catalog.node_max(WOOD), 50.0);
        assert_eq!(catalog.node_max("resource.unknown"), 50.0);
    }
}

//! Upgrade definition table and effect resolution
//!
//! Wire-format effects are a stringly-typed triple (type, value, target).
//! They resolve into the closed `UpgradeEffect` variant once, at config
//! load, so an unknown effect type surfaces immediately instead of on
//! some later purchase.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::resources::definitions::{FOOD, SCRAP, WOOD};
use crate::resources::ledger::ResourceLedger;

/// Mechanical effect of an upgrade, resolved at config-load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Sets the gather multiplier for one resource
    GatherMultiplier { resource: String, value: f32 },
    /// Adds a flat per-tick income bonus to one resource
    IncomeBonus { resource: String, value: f32 },
    /// Narrative or cosmetic upgrade with no mechanical effect
    None,
}

impl UpgradeEffect {
    /// Resolve a wire-format effect triple. Unknown types warn and
    /// resolve to `None` so the upgrade stays purchasable.
    pub fn resolve(effect_type: &str, value: f32, target: &str) -> Self {
        match effect_type {
            "gather_multiplier" => Self::GatherMultiplier {
                resource: target.to_string(),
                value,
            },
            "wood_income" => Self::IncomeBonus {
                resource: WOOD.to_string(),
                value,
            },
            "food_income" => Self::IncomeBonus {
                resource: FOOD.to_string(),
                value,
            },
            "scrap_income" => Self::IncomeBonus {
                resource: SCRAP.to_string(),
                value,
            },
            "" => Self::None,
            other => {
                tracing::warn!(effect_type = other, "Unknown upgrade effect type, treating as no-op");
                Self::None
            }
        }
    }

    /// Apply the effect to the ledger
    pub fn apply(&self, ledger: &mut ResourceLedger) {
        match self {
            Self::GatherMultiplier { resource, value } => {
                ledger.set_gather_multiplier(resource, *value)
            }
            Self::IncomeBonus { resource, value } => ledger.add_income_bonus(resource, *value),
            Self::None => {}
        }
    }
}

/// Immutable configuration for one upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Nonzero cost components in deterministic (sorted) order
    pub cost: Vec<(String, f32)>,
    pub effect: UpgradeEffect,
}

/// Wire format for one `[[upgrades]]` TOML entry
#[derive(Debug, Deserialize)]
struct RawUpgrade {
    id: String,
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cost: BTreeMap<String, f32>,
    #[serde(default)]
    effect_type: String,
    #[serde(default)]
    effect_value: f32,
    #[serde(default)]
    effect_target: String,
}

#[derive(Debug, Deserialize)]
struct UpgradeTable {
    #[serde(default)]
    upgrades: Vec<RawUpgrade>,
}

/// Immutable, ordered table of upgrade definitions
#[derive(Debug, Clone)]
pub struct UpgradeCatalog {
    defs: Vec<UpgradeDefinition>,
    by_id: AHashMap<String, usize>,
}

impl UpgradeCatalog {
    pub fn new(defs: Vec<UpgradeDefinition>) -> Result<Self> {
        if defs.is_empty() {
            return Err(GameError::InvalidConfig(
                "upgrade definition table must not be empty".to_string(),
            ));
        }
        let mut by_id = AHashMap::with_capacity(defs.len());
        for (idx, def) in defs.iter().enumerate() {
            if def.id.is_empty() {
                return Err(GameError::InvalidConfig(
                    "upgrade definition has an empty id".to_string(),
                ));
            }
            if let Some((res, amt)) = def.cost.iter().find(|(_, amt)| *amt < 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{}: cost of {} must not be negative (got {})",
                    def.id, res, amt
                )));
            }
            if by_id.insert(def.id.clone(), idx).is_some() {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate upgrade id: {}",
                    def.id
                )));
            }
        }
        Ok(Self { defs, by_id })
    }

    /// The built-in island upgrade table
    pub fn default_island() -> Self {
        fn def(
            id: &str,
            name: &str,
            description: &str,
            cost: &[(&str, f32)],
            effect: UpgradeEffect,
        ) -> UpgradeDefinition {
            UpgradeDefinition {
                id: id.to_string(),
                display_name: name.to_string(),
                description: description.to_string(),
                cost: cost
                    .iter()
                    .map(|(res, amt)| (res.to_string(), *amt))
                    .collect(),
                effect,
            }
        }

        Self::new(vec![
            def(
                "upgrade.sharp_axe",
                "Sharp Axe",
                "A scrap blade lashed to driftwood. Trees fall faster.",
                &[(WOOD, 10.0)],
                UpgradeEffect::GatherMultiplier {
                    resource: WOOD.to_string(),
                    value: 1.5,
                },
            ),
            def(
                "upgrade.fishing_spear",
                "Fishing Spear",
                "Tide pools stop being a gamble.",
                &[(WOOD, 15.0), (SCRAP, 5.0)],
                UpgradeEffect::GatherMultiplier {
                    resource: FOOD.to_string(),
                    value: 1.5,
                },
            ),
            def(
                "upgrade.smokehouse",
                "Smokehouse",
                "Preserved rations trickle in even while you rest.",
                &[(WOOD, 25.0), (FOOD, 10.0)],
                UpgradeEffect::IncomeBonus {
                    resource: FOOD.to_string(),
                    value: 0.5,
                },
            ),
            def(
                "upgrade.lumber_camp",
                "Lumber Camp",
                "Stacked and seasoned; wood accumulates on its own.",
                &[(WOOD, 40.0), (SCRAP, 10.0)],
                UpgradeEffect::IncomeBonus {
                    resource: WOOD.to_string(),
                    value: 0.5,
                },
            ),
            def(
                "upgrade.scrap_magnet",
                "Scrap Magnet",
                "The wreck keeps giving if you keep looking.",
                &[(SCRAP, 20.0)],
                UpgradeEffect::IncomeBonus {
                    resource: SCRAP.to_string(),
                    value: 0.3,
                },
            ),
            def(
                "upgrade.palm_shelter",
                "Palm Shelter",
                "It changes nothing and everything. Home.",
                &[(WOOD, 20.0), (FOOD, 5.0)],
                UpgradeEffect::None,
            ),
        ])
        .expect("built-in upgrade table is valid")
    }

    /// Parse a `[[upgrades]]` TOML table, resolving effects
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: UpgradeTable = toml::from_str(content)?;
        let defs = table
            .upgrades
            .into_iter()
            .map(|raw| UpgradeDefinition {
                effect: UpgradeEffect::resolve(&raw.effect_type, raw.effect_value, &raw.effect_target),
                id: raw.id,
                display_name: raw.display_name,
                description: raw.description,
                cost: raw.cost.into_iter().collect(),
            })
            .collect();
        Self::new(defs)
    }

    pub fn get(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.by_id.get(id).map(|idx| &self.defs[*idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Definitions in declaration order
    pub fn defs(&self) -> &[UpgradeDefinition] {
        &self.defs
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

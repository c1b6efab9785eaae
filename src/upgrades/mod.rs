//! Upgrade definitions, effects, and purchase handling

pub mod catalog;
pub mod manager;

pub use catalog::{UpgradeCatalog, UpgradeDefinition, UpgradeEffect};
pub use manager::UpgradeManager;

//! Upgrade purchase and effect application
//!
//! Purchases are all-or-nothing: every cost component is checked against
//! the ledger before any spend happens, so a failed purchase never
//! leaves a partial deduction behind.

use std::sync::Arc;

use crate::resources::ledger::ResourceLedger;
use crate::upgrades::catalog::UpgradeCatalog;

/// Tracks owned upgrades and performs purchases
#[derive(Debug, Clone)]
pub struct UpgradeManager {
    catalog: Arc<UpgradeCatalog>,
    /// Purchase order matters: effects re-apply in this order on load
    owned: Vec<String>,
}

impl UpgradeManager {
    pub fn new(catalog: Arc<UpgradeCatalog>) -> Self {
        Self {
            catalog,
            owned: Vec::new(),
        }
    }

    pub fn is_owned(&self, id: &str) -> bool {
        self.owned.iter().any(|owned| owned == id)
    }

    /// Owned upgrade ids in purchase order
    pub fn owned(&self) -> &[String] {
        &self.owned
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    /// Forget all purchases (run bootstrap)
    pub fn reset(&mut self) {
        self.owned.clear();
    }

    /// Attempt a purchase. Insufficient resources are expected control
    /// flow and return false silently; owned/unknown ids warn.
    pub fn try_buy(&mut self, id: &str, ledger: &mut ResourceLedger) -> bool {
        let Some(def) = self.catalog.get(id) else {
            tracing::warn!(upgrade = id, "Ignoring purchase of unknown upgrade");
            return false;
        };
        if self.is_owned(id) {
            tracing::warn!(upgrade = id, "Ignoring repeat purchase");
            return false;
        }

        // All-or-nothing: verify the full bundle before spending any of it
        if def.cost.iter().any(|(res, amt)| ledger.get(res) < *amt) {
            return false;
        }
        for (res, amt) in &def.cost {
            let spent = ledger.try_spend(res, *amt);
            debug_assert!(spent, "affordability was checked before spending");
        }

        def.effect.apply(ledger);
        self.owned.push(id.to_string());
        tracing::info!(upgrade = id, "Purchased upgrade");
        true
    }

    /// Restore a persisted purchase list, re-applying effects in stored
    /// order without charging costs. Ids missing from the catalog warn
    /// but stay owned, so a save written against a richer table is not
    /// silently thinned.
    pub fn restore(&mut self, owned: &[String], ledger: &mut ResourceLedger) {
        self.owned.clear();
        for id in owned {
            match self.catalog.get(id) {
                Some(def) => def.effect.apply(ledger),
                None => tracing::warn!(upgrade = %id, "Save references unknown upgrade"),
            }
            self.owned.push(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::definitions::{ResourceCatalog, FOOD, SCRAP, WOOD};

    fn fixtures() -> (UpgradeManager, ResourceLedger) {
        let manager = UpgradeManager::new(Arc::new(UpgradeCatalog::default_island()));
        let mut ledger = ResourceLedger::new(Arc::new(ResourceCatalog::default_island()));
        ledger.initialize(None);
        (manager, ledger)
    }

    #[test]
    fn test_buy_deducts_and_applies_effect() {
        let (mut manager, mut ledger) = fixtures();
        ledger.add(WOOD, 50.0);

        assert!(manager.try_buy("upgrade.sharp_axe", &mut ledger));
        assert_eq!(ledger.get(WOOD), 40.0);
        assert_eq!(ledger.gather_multiplier(WOOD), 1.5);
        assert!(manager.is_owned("upgrade.sharp_axe"));
    }

    #[test]
    fn test_unaffordable_purchase_changes_nothing() {
        let (mut manager, mut ledger) = fixtures();
        ledger.add(WOOD, 4.0);

        assert!(!manager.try_buy("upgrade.sharp_axe", &mut ledger));
        assert_eq!(ledger.get(WOOD), 4.0);
        assert!(!manager.is_owned("upgrade.sharp_axe"));
    }

    #[test]
    fn test_partial_affordability_spends_nothing() {
        let (mut manager, mut ledger) = fixtures();
        // fishing_spear costs wood 15 + scrap 5; plenty of wood, no scrap
        ledger.add(WOOD, 100.0);
        let wood_before = ledger.get(WOOD);
        let food_before = ledger.get(FOOD);

        assert!(!manager.try_buy("upgrade.fishing_spear", &mut ledger));
        assert_eq!(ledger.get(WOOD), wood_before);
        assert_eq!(ledger.get(FOOD), food_before);
        assert_eq!(ledger.get(SCRAP), 0.0);
    }

    #[test]
    fn test_repeat_purchase_rejected() {
        let (mut manager, mut ledger) = fixtures();
        ledger.add(WOOD, 50.0);

        assert!(manager.try_buy("upgrade.sharp_axe", &mut ledger));
        let wood_after_first = ledger.get(WOOD);
        assert!(!manager.try_buy("upgrade.sharp_axe", &mut ledger));
        assert_eq!(ledger.get(WOOD), wood_after_first);
    }

    #[test]
    fn test_unknown_upgrade_rejected() {
        let (mut manager, mut ledger) = fixtures();
        assert!(!manager.try_buy("upgrade.teleporter", &mut ledger));
    }

    #[test]
    fn test_cosmetic_upgrade_grants_without_effect() {
        let (mut manager, mut ledger) = fixtures();
        ledger.add(WOOD, 50.0);
        ledger.add(FOOD, 50.0);

        assert!(manager.try_buy("upgrade.palm_shelter", &mut ledger));
        assert!(manager.is_owned("upgrade.palm_shelter"));
        assert_eq!(ledger.gather_multiplier(WOOD), 1.0);
        assert_eq!(ledger.gather_multiplier(FOOD), 1.0);
    }

    #[test]
    fn test_restore_reapplies_without_charging() {
        let (mut manager, mut ledger) = fixtures();
        ledger.add(WOOD, 100.0);
        ledger.add(SCRAP, 50.0);
        assert!(manager.try_buy("upgrade.sharp_axe", &mut ledger));
        assert!(manager.try_buy("upgrade.scrap_magnet", &mut ledger));
        let owned = manager.owned().to_vec();

        // Fresh run state, as after a load
        let (mut manager, mut ledger) = fixtures();
        let wood_before = ledger.get(WOOD);
        manager.restore(&owned, &mut ledger);

        assert_eq!(manager.owned(), owned.as_slice());
        assert_eq!(ledger.get(WOOD), wood_before); // no cost charged
        assert_eq!(ledger.gather_multiplier(WOOD), 1.5);
    }

    #[test]
    fn test_restore_keeps_unknown_ids() {
        let (mut manager, mut ledger) = fixtures();
        let owned = vec![
            "upgrade.sharp_axe".to_string(),
            "upgrade.from_the_future".to_string(),
        ];
        manager.restore(&owned, &mut ledger);
        assert_eq!(manager.owned(), owned.as_slice());
        assert_eq!(ledger.gather_multiplier(WOOD), 1.5);
    }
}

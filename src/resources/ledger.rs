//! Resource ledger - live per-resource amounts and modifiers
//!
//! Amounts are clamped to `[0, max_amount]` after every operation, and
//! `try_spend` is strictly check-then-commit: it either subtracts the
//! full amount or leaves the ledger untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;

use crate::resources::definitions::ResourceCatalog;

#[derive(Debug, Clone)]
struct ResourceState {
    amount: f32,
    /// Additive per-tick bonus granted by upgrades
    income_bonus: f32,
    /// Multiplicative gather modifier granted by upgrades
    gather_multiplier: f32,
}

impl ResourceState {
    fn new(amount: f32) -> Self {
        Self {
            amount,
            income_bonus: 0.0,
            gather_multiplier: 1.0,
        }
    }
}

/// Live mapping from resource id to amount and derived modifiers
#[derive(Debug, Clone)]
pub struct ResourceLedger {
    catalog: Arc<ResourceCatalog>,
    states: AHashMap<String, ResourceState>,
}

impl ResourceLedger {
    pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
        Self {
            catalog,
            states: AHashMap::new(),
        }
    }

    /// Seed amounts for every defined resource and reset all modifiers.
    ///
    /// `initial` overrides the definition's starting amount where present
    /// (config overrides on a fresh run, persisted amounts on a load).
    pub fn initialize(&mut self, initial: Option<&AHashMap<String, f32>>) {
        self.states.clear();
        for def in self.catalog.iter() {
            let amount = initial
                .and_then(|map| map.get(&def.id).copied())
                .unwrap_or(def.starting_amount)
                .clamp(0.0, def.max_amount);
            self.states.insert(def.id.clone(), ResourceState::new(amount));
        }
    }

    /// Apply passive income, upgrade income bonuses, and decay for one tick
    pub fn on_tick(&mut self) {
        for def in self.catalog.iter() {
            if let Some(state) = self.states.get_mut(&def.id) {
                let delta = def.base_income_per_tick + state.income_bonus - def.decay_per_tick;
                state.amount = (state.amount + delta).clamp(0.0, def.max_amount);
            }
        }
    }

    /// Current amount; unknown ids read as 0 (resource not present)
    pub fn get(&self, id: &str) -> f32 {
        self.states.get(id).map(|s| s.amount).unwrap_or(0.0)
    }

    /// Add up to the resource's cap; no-op for unknown ids
    pub fn add(&mut self, id: &str, amount: f32) {
        let Some(def) = self.catalog.get(id) else {
            tracing::warn!(resource = id, "Ignoring add for unknown resource");
            return;
        };
        if let Some(state) = self.states.get_mut(id) {
            state.amount = (state.amount + amount).clamp(0.0, def.max_amount);
        }
    }

    /// Spend `amount` if the balance covers it. This is the sole spend
    /// path: check-then-commit, never a partial subtraction.
    pub fn try_spend(&mut self, id: &str, amount: f32) -> bool {
        let Some(state) = self.states.get_mut(id) else {
            tracing::warn!(resource = id, "Ignoring spend for unknown resource");
            return false;
        };
        if state.amount < amount {
            return false;
        }
        state.amount = (state.amount - amount).max(0.0);
        true
    }

    /// Upgrade hook: add a flat per-tick income bonus
    pub fn add_income_bonus(&mut self, id: &str, bonus: f32) {
        match self.states.get_mut(id) {
            Some(state) => state.income_bonus += bonus,
            None => tracing::warn!(resource = id, "Ignoring income bonus for unknown resource"),
        }
    }

    /// Upgrade hook: set the gather multiplier
    pub fn set_gather_multiplier(&mut self, id: &str, multiplier: f32) {
        match self.states.get_mut(id) {
            Some(state) => state.gather_multiplier = multiplier,
            None => {
                tracing::warn!(resource = id, "Ignoring gather multiplier for unknown resource")
            }
        }
    }

    /// Gather multiplier, default 1.0 when unset or unknown
    pub fn gather_multiplier(&self, id: &str) -> f32 {
        self.states.get(id).map(|s| s.gather_multiplier).unwrap_or(1.0)
    }

    /// Definition gather rate, default 1.0 when undefined
    pub fn base_gather_rate(&self, id: &str) -> f32 {
        self.catalog
            .get(id)
            .map(|def| def.gather_rate_per_tick)
            .unwrap_or(1.0)
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Ordered snapshot of current amounts, for persistence
    pub fn snapshot(&self) -> BTreeMap<String, f32> {
        self.states
            .iter()
            .map(|(id, state)| (id.clone(), state.amount))
            .collect()
    }
}

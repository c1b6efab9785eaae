//! Run orchestration - owns the simulation and its command surface
//!
//! One explicitly constructed controller instance drives everything; UI
//! and input layers hold a reference and speak through commands plus
//! read-only getters. Outbound notifications queue up here and are
//! drained by the front end, fire-and-forget.

use std::sync::Arc;

use ahash::AHashMap;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;
use crate::core::types::Tick;
use crate::island::generator::WorldGenerator;
use crate::island::grid::IslandGrid;
use crate::resources::definitions::ResourceCatalog;
use crate::resources::gather::tick_gather;
use crate::resources::ledger::ResourceLedger;
use crate::save::autosave::AutoSaveScheduler;
use crate::save::data::{LoadedRun, PlayerState, RunState, WorldState};
use crate::save::gateway::SaveGateway;
use crate::sim::hazard::tick_storm;
use crate::sim::scheduler::TickScheduler;
use crate::sim::state::GamePhase;
use crate::upgrades::catalog::UpgradeCatalog;
use crate::upgrades::manager::UpgradeManager;

/// Keeps the hazard stream decorrelated from world generation
const HAZARD_SEED_SALT: u64 = 0x51AB_0001;

/// Outbound, fire-and-forget notifications for external collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged { from: GamePhase, to: GamePhase },
    Storm { tick: Tick, resource_id: String, loss: f32 },
    Saved { tick: Tick },
    SaveFailed { tick: Tick },
    RunWon { tick: Tick },
}

/// Owns run state and drives the win/lose state machine
pub struct RunController {
    config: GameConfig,
    resources: Arc<ResourceCatalog>,
    phase: GamePhase,
    scheduler: TickScheduler,
    autosave: AutoSaveScheduler,
    gateway: SaveGateway,
    ledger: ResourceLedger,
    upgrades: UpgradeManager,
    island: Option<IslandGrid>,
    escape_progress: f32,
    hazard_rng: GameRng,
    events: Vec<GameEvent>,
}

impl RunController {
    /// Build a controller from validated configuration. Fails fast on
    /// config problems; nothing here is recoverable mid-run.
    pub fn new(
        config: GameConfig,
        resources: ResourceCatalog,
        upgrades: UpgradeCatalog,
    ) -> Result<Self> {
        config.validate()?;

        // Cross-check cost bundles against the resource table now, not
        // at spend time
        for (id, _) in &config.escape.cost {
            if !resources.contains(id) {
                return Err(GameError::InvalidConfig(format!(
                    "escape cost references unknown resource: {}",
                    id
                )));
            }
        }
        for def in upgrades.iter() {
            for (id, _) in &def.cost {
                if !resources.contains(id) {
                    return Err(GameError::InvalidConfig(format!(
                        "{}: cost references unknown resource: {}",
                        def.id, id
                    )));
                }
            }
        }

        let resources = Arc::new(resources);
        let upgrades = Arc::new(upgrades);
        let scheduler = TickScheduler::new(config.tick_interval_secs);
        let autosave = AutoSaveScheduler::new(config.autosave_every_n_ticks);
        let gateway = SaveGateway::new(config.save_path.clone());
        let ledger = ResourceLedger::new(Arc::clone(&resources));
        let upgrades = UpgradeManager::new(upgrades);

        Ok(Self {
            config,
            resources,
            phase: GamePhase::Boot,
            scheduler,
            autosave,
            gateway,
            ledger,
            upgrades,
            island: None,
            escape_progress: 0.0,
            hazard_rng: GameRng::from_seed(HAZARD_SEED_SALT),
            events: Vec::new(),
        })
    }

    // === Run lifecycle ===

    /// Start a fresh run: new world, starting resources, no upgrades.
    /// Valid from any phase; an abandoned run is simply dropped.
    pub fn start_new_run(&mut self, seed: u64) -> Result<()> {
        let data = WorldGenerator::generate(seed, &self.config.island, &self.resources)?;
        self.island = Some(IslandGrid::new(data));
        self.ledger.initialize(Some(&self.config.starting_amounts));
        self.upgrades.reset();
        self.escape_progress = 0.0;
        self.scheduler.reset(0);
        self.autosave.reset();
        self.hazard_rng = GameRng::from_seed(seed ^ HAZARD_SEED_SALT);

        tracing::info!(seed, "Starting new run");
        self.set_phase(GamePhase::Running);
        Ok(())
    }

    /// Load the save slot. A corrupt or incompatible save silently
    /// becomes a fresh island: the slot is deleted and a new run starts
    /// with `fallback_seed`. Returns whether the save was restored.
    pub fn load_game(&mut self, fallback_seed: u64) -> Result<bool> {
        match self.gateway.load() {
            Some(run) => {
                self.restore(run);
                tracing::info!(tick = self.scheduler.current_tick(), "Loaded save");
                self.set_phase(GamePhase::Running);
                Ok(true)
            }
            None => {
                if self.gateway.has_save() {
                    tracing::warn!("Discarding invalid save and starting fresh");
                }
                self.gateway.delete();
                self.start_new_run(fallback_seed)?;
                Ok(false)
            }
        }
    }

    fn restore(&mut self, run: LoadedRun) {
        let seed = run.world.seed;
        self.island = Some(IslandGrid::new(run.world.into_island()));

        let amounts: AHashMap<String, f32> = run.player.resources.into_iter().collect();
        self.ledger.initialize(Some(&amounts));
        self.upgrades.reset();
        self.upgrades.restore(&run.player.upgrades, &mut self.ledger);
        self.escape_progress = run.player.escape_progress.clamp(0.0, 1.0);
        self.scheduler.reset(run.tick);
        self.autosave.reset();
        self.hazard_rng = GameRng::from_seed(seed ^ HAZARD_SEED_SALT);
    }

    /// Request a state transition. Invalid ones warn and do nothing.
    pub fn transition_to(&mut self, next: GamePhase) {
        if next == self.phase {
            return;
        }
        if !self.phase.can_transition_to(next) {
            tracing::warn!(from = ?self.phase, to = ?next, "Ignoring invalid state transition");
            return;
        }
        self.set_phase(next);
    }

    fn set_phase(&mut self, next: GamePhase) {
        if next == self.phase {
            return;
        }
        let from = self.phase;
        self.phase = next;
        tracing::info!(?from, to = ?next, "State changed");

        match next {
            GamePhase::Running => self.scheduler.start(),
            GamePhase::Pause => self.scheduler.stop(),
            GamePhase::Won | GamePhase::GameOver | GamePhase::Exit => {
                self.scheduler.stop();
                self.save_now();
            }
            GamePhase::Boot => {}
        }

        self.events.push(GameEvent::StateChanged { from, to: next });
    }

    // === Time ===

    /// Feed elapsed real time and run any ticks that fall due
    pub fn update(&mut self, dt_secs: f32) {
        let fired = self.scheduler.advance(dt_secs);
        for _ in 0..fired {
            self.run_tick();
        }
    }

    /// Manual single step; works while paused, never while terminal
    pub fn step(&mut self) {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Pause) {
            tracing::warn!(phase = ?self.phase, "Ignoring manual tick outside an active run");
            return;
        }
        self.scheduler.step();
        self.run_tick();
    }

    /// Set the pacing multiplier (the one runtime-tunable config value)
    pub fn set_speed(&mut self, multiplier: f32) {
        self.scheduler.set_speed(multiplier);
    }

    /// One simulation tick. Order is fixed: passive income/decay, then
    /// gathering, then hazards (which must see the post-income ledger),
    /// then the autosave check (which must see the post-hazard state).
    fn run_tick(&mut self) {
        let tick = self.scheduler.current_tick();

        self.ledger.on_tick();

        if let Some(island) = self.island.as_mut() {
            let harvests = tick_gather(island, &mut self.ledger, self.config.gather_radius);
            if !harvests.is_empty() {
                tracing::debug!(tick, count = harvests.len(), "Gathered");
            }
        }

        if let Some(storm) = tick_storm(
            &self.config.storm,
            &mut self.hazard_rng,
            &self.resources,
            &mut self.ledger,
            tick,
        ) {
            self.events.push(GameEvent::Storm {
                tick: storm.tick,
                resource_id: storm.resource_id,
                loss: storm.loss,
            });
        }

        if self.autosave.note_tick() {
            self.save_now();
        }
    }

    // === Persistence ===

    /// Save immediately, independent of the autosave cadence
    pub fn force_save(&mut self) {
        self.save_now();
    }

    fn save_now(&mut self) {
        let Some(run) = self.snapshot() else {
            return; // nothing to persist before the first run starts
        };
        let tick = self.scheduler.current_tick();
        match self.gateway.save(&run) {
            Ok(()) => {
                self.autosave.reset();
                self.events.push(GameEvent::Saved { tick });
            }
            Err(err) => {
                // Non-fatal: the run continues unsaved and the next
                // autosave cycle retries
                tracing::warn!(error = %err, "Save failed");
                self.events.push(GameEvent::SaveFailed { tick });
            }
        }
    }

    /// Flush live state into the persistence shape
    fn snapshot(&self) -> Option<RunState> {
        let island = self.island.as_ref()?;
        Some(RunState {
            tick: self.scheduler.current_tick(),
            player: PlayerState {
                resources: self.ledger.snapshot(),
                escape_progress: self.escape_progress,
                upgrades: self.upgrades.owned().to_vec(),
            },
            world: Some(WorldState::from_island(island.data(), island.nodes())),
        })
    }

    pub fn has_save(&self) -> bool {
        self.gateway.has_save()
    }

    pub fn delete_save(&self) {
        self.gateway.delete();
    }

    // === Player commands ===

    /// Buy an upgrade; false when unaffordable, unknown, or already owned
    pub fn try_buy_upgrade(&mut self, id: &str) -> bool {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Pause) {
            tracing::warn!(upgrade = id, phase = ?self.phase, "Ignoring purchase outside an active run");
            return false;
        }
        self.upgrades.try_buy(id, &mut self.ledger)
    }

    /// Spend the escape bundle for a fixed chunk of progress. The cost
    /// check is all-or-nothing, like an upgrade purchase. Reaching full
    /// progress wins the run and forces a save.
    pub fn attempt_escape(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Pause) {
            tracing::warn!(phase = ?self.phase, "Ignoring escape attempt outside an active run");
            return false;
        }
        let cost = &self.config.escape.cost;
        if cost.iter().any(|(id, amt)| self.ledger.get(id) < *amt) {
            return false;
        }
        for (id, amt) in cost {
            let spent = self.ledger.try_spend(id, *amt);
            debug_assert!(spent, "affordability was checked before spending");
        }

        self.escape_progress =
            (self.escape_progress + self.config.escape.progress_per_attempt).min(1.0);
        tracing::info!(progress = self.escape_progress, "Escape attempt succeeded");

        if self.escape_progress >= 1.0 {
            let tick = self.scheduler.current_tick();
            self.events.push(GameEvent::RunWon { tick });
            self.set_phase(GamePhase::Won);
        }
        true
    }

    // === Read-only surface ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_tick(&self) -> Tick {
        self.scheduler.current_tick()
    }

    pub fn escape_progress(&self) -> f32 {
        self.escape_progress
    }

    pub fn resource(&self, id: &str) -> f32 {
        self.ledger.get(id)
    }

    pub fn is_upgrade_owned(&self, id: &str) -> bool {
        self.upgrades.is_owned(id)
    }

    pub fn island(&self) -> Option<&IslandGrid> {
        self.island.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn resource_catalog(&self) -> &ResourceCatalog {
        &self.resources
    }

    pub fn upgrade_catalog(&self) -> &UpgradeCatalog {
        self.upgrades.catalog()
    }

    pub fn owned_upgrades(&self) -> &[String] {
        self.upgrades.owned()
    }

    /// Drain queued outbound notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

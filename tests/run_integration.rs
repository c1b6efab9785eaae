//! Integration tests for the run controller and the tick pipeline
//!
//! These walk the documented player-facing scenarios end to end:
//! bootstrap, gathering and node depletion, upgrade purchases, escape
//! attempts, and the storm hazard.

use castaway_isle::core::config::GameConfig;
use castaway_isle::island::generator::{IslandData, ResourceNode};
use castaway_isle::island::grid::IslandGrid;
use castaway_isle::island::terrain::Terrain;
use castaway_isle::resources::definitions::{ResourceCatalog, FOOD, SCRAP, WOOD};
use castaway_isle::resources::gather::tick_gather;
use castaway_isle::resources::ledger::ResourceLedger;
use castaway_isle::sim::controller::{GameEvent, RunController};
use castaway_isle::sim::state::GamePhase;
use castaway_isle::upgrades::catalog::UpgradeCatalog;

use std::sync::Arc;

fn test_config(name: &str) -> GameConfig {
    let mut config = GameConfig::default();
    config.island.width = 20;
    config.island.height = 20;
    config.island.resource_density = 0.15;
    config.storm.probability = 0.0;
    config.save_path = std::env::temp_dir().join(format!("castaway_isle_run_{name}.json"));
    config
}

fn new_controller(config: GameConfig) -> RunController {
    let controller = RunController::new(
        config,
        ResourceCatalog::default_island(),
        UpgradeCatalog::default_island(),
    )
    .unwrap();
    controller.delete_save();
    controller
}

// ============================================================================
// Bootstrap scenario
// ============================================================================

#[test]
fn test_new_run_bootstrap_scenario() {
    // 20x20 island, density 0.15, wood 5 / food 10 / scrap 0, seed 42
    let mut config = test_config("bootstrap");
    config.starting_amounts.insert(WOOD.to_string(), 5.0);
    config.starting_amounts.insert(FOOD.to_string(), 10.0);
    config.starting_amounts.insert(SCRAP.to_string(), 0.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    assert_eq!(game.resource(WOOD), 5.0);
    assert_eq!(game.resource(FOOD), 10.0);
    assert_eq!(game.resource(SCRAP), 0.0);
    assert_eq!(game.current_tick(), 0);
    assert_eq!(game.escape_progress(), 0.0);
    assert_eq!(game.phase(), GamePhase::Running);
    assert!(game.island().is_some());
}

// ============================================================================
// Depletion scenario
// ============================================================================

/// A lone wood node worked at rate 1.0 drains exactly its capacity: after
/// 50 ticks the node reads 0 and the ledger gained all 50 units.
#[test]
fn test_single_node_drains_into_ledger() {
    let catalog = Arc::new(ResourceCatalog::default_island());
    let mut ledger = ResourceLedger::new(Arc::clone(&catalog));
    ledger.initialize(None);

    let size = 9;
    let mut grid = IslandGrid::new(IslandData {
        seed: 0,
        biome: "island.tropical".to_string(),
        width: size,
        height: size,
        spawn_x: size / 2,
        spawn_y: size / 2,
        terrain: vec![Terrain::Clearing; (size * size) as usize],
        nodes: vec![ResourceNode {
            resource_id: WOOD.to_string(),
            x: size / 2 + 1,
            y: size / 2,
            amount: 50.0,
            max_amount: 50.0,
        }],
    });

    // Same per-tick order the controller uses: passive tick, then gather
    for _ in 0..50 {
        ledger.on_tick();
        tick_gather(&mut grid, &mut ledger, 8.0);
    }

    assert_eq!(grid.nodes()[0].amount, 0.0);
    assert_eq!(ledger.get(WOOD), 50.0);

    // Further ticks change nothing: the node is spent, not removed
    ledger.on_tick();
    let harvests = tick_gather(&mut grid, &mut ledger, 8.0);
    assert!(harvests.is_empty());
    assert_eq!(grid.nodes().len(), 1);
    assert_eq!(ledger.get(WOOD), 50.0);
}

// ============================================================================
// Purchase scenarios
// ============================================================================

#[test]
fn test_failed_purchase_leaves_ledger_untouched() {
    // wood 4 on hand against a cost of wood 10
    let mut config = test_config("failed_purchase");
    config.starting_amounts.insert(WOOD.to_string(), 4.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    assert!(!game.try_buy_upgrade("upgrade.sharp_axe"));
    assert_eq!(game.resource(WOOD), 4.0);
    assert!(!game.is_upgrade_owned("upgrade.sharp_axe"));
}

#[test]
fn test_purchase_applies_effect_through_controller() {
    let mut config = test_config("purchase");
    config.starting_amounts.insert(WOOD.to_string(), 50.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    assert!(game.try_buy_upgrade("upgrade.sharp_axe"));
    assert_eq!(game.resource(WOOD), 40.0);
    assert!(game.is_upgrade_owned("upgrade.sharp_axe"));
    // Repeat purchases refuse without charging
    assert!(!game.try_buy_upgrade("upgrade.sharp_axe"));
    assert_eq!(game.resource(WOOD), 40.0);
}

#[test]
fn test_multi_resource_purchase_is_atomic() {
    // fishing_spear costs wood 15 + scrap 5; wood is plentiful, scrap absent
    let mut config = test_config("atomic");
    config.starting_amounts.insert(WOOD.to_string(), 100.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    assert!(!game.try_buy_upgrade("upgrade.fishing_spear"));
    assert_eq!(game.resource(WOOD), 100.0);
    assert_eq!(game.resource(SCRAP), 0.0);
}

// ============================================================================
// Escape and win
// ============================================================================

#[test]
fn test_escape_attempts_win_the_run() {
    let mut config = test_config("escape");
    // Cheap raft for the test: two attempts at half progress each
    config.escape.cost.clear();
    config.escape.cost.insert(FOOD.to_string(), 2.0);
    config.escape.progress_per_attempt = 0.5;
    config.starting_amounts.insert(FOOD.to_string(), 10.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();
    game.drain_events();

    assert!(game.attempt_escape());
    assert_eq!(game.escape_progress(), 0.5);
    assert_eq!(game.phase(), GamePhase::Running);

    assert!(game.attempt_escape());
    assert_eq!(game.escape_progress(), 1.0);
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.resource(FOOD), 6.0);

    // Winning forced a save and announced itself
    assert!(game.has_save());
    let events = game.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::RunWon { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::StateChanged {
            from: GamePhase::Running,
            to: GamePhase::Won
        }
    )));

    game.delete_save();
}

#[test]
fn test_unaffordable_escape_spends_nothing() {
    let mut config = test_config("poor_escape");
    config.starting_amounts.insert(WOOD.to_string(), 29.0);
    config.starting_amounts.insert(FOOD.to_string(), 20.0);
    config.starting_amounts.insert(SCRAP.to_string(), 10.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    // wood 29 < 30: the whole bundle must stay untouched
    assert!(!game.attempt_escape());
    assert_eq!(game.resource(WOOD), 29.0);
    assert_eq!(game.resource(FOOD), 20.0);
    assert_eq!(game.resource(SCRAP), 10.0);
    assert_eq!(game.escape_progress(), 0.0);
}

// ============================================================================
// Scheduler pacing through the controller
// ============================================================================

#[test]
fn test_update_paces_ticks_by_interval_and_speed() {
    let mut config = test_config("pacing");
    config.tick_interval_secs = 2.0;

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();

    game.update(1.0);
    assert_eq!(game.current_tick(), 0);
    game.update(1.5);
    assert_eq!(game.current_tick(), 1);

    // 0.5s banked; 2s at 4x adds 8s -> four more intervals
    game.set_speed(4.0);
    game.update(2.0);
    assert_eq!(game.current_tick(), 5);
}

#[test]
fn test_long_stall_catches_up_bounded() {
    let mut game = new_controller(test_config("stall"));
    game.start_new_run(42).unwrap();

    // An hour away from the keyboard, one bounded burst
    game.update(3600.0);
    assert_eq!(game.current_tick(), 5);
}

// ============================================================================
// Storm hazard
// ============================================================================

#[test]
fn test_storms_fire_and_drain_resources() {
    let mut config = test_config("storms");
    config.storm.probability = 1.0;
    config.island.resource_density = 0.0; // no gathering income in the way
    config.starting_amounts.insert(WOOD.to_string(), 100.0);
    config.starting_amounts.insert(FOOD.to_string(), 100.0);
    config.starting_amounts.insert(SCRAP.to_string(), 100.0);

    let mut game = new_controller(config);
    game.start_new_run(42).unwrap();
    game.drain_events();

    for _ in 0..10 {
        game.step();
    }

    let storms: Vec<GameEvent> = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Storm { .. }))
        .collect();
    assert_eq!(storms.len(), 10);

    // Ten storms at >= 2 loss each have to leave a dent somewhere
    let total: f32 = [WOOD, FOOD, SCRAP].iter().map(|id| game.resource(id)).sum();
    assert!(total < 300.0);
}

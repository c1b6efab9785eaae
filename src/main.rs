//! Castaway Isle - Entry Point
//!
//! Interactive command loop around the simulation engine. The loop is a
//! plain external collaborator: it issues commands, reads state through
//! getters, and prints drained notifications. No simulation logic lives
//! here.

use castaway_isle::core::config::GameConfig;
use castaway_isle::core::error::Result;
use castaway_isle::resources::definitions::ResourceCatalog;
use castaway_isle::sim::controller::{GameEvent, RunController};
use castaway_isle::sim::state::GamePhase;
use castaway_isle::upgrades::catalog::UpgradeCatalog;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Idle survival simulation - escape the island
#[derive(Parser, Debug)]
#[command(name = "castaway-isle")]
#[command(about = "Idle survival simulation - escape a procedurally generated island")]
struct Args {
    /// Island seed for new runs (and the fallback when a load fails)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML config overriding the engine defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override where the save slot lives
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Resume from the save slot instead of starting fresh
    #[arg(long)]
    load: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("castaway_isle=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(path) = args.save_path {
        config.save_path = path;
    }

    let mut game = RunController::new(
        config,
        ResourceCatalog::default_island(),
        UpgradeCatalog::default_island(),
    )?;

    if args.load {
        game.load_game(args.seed)?;
    } else {
        game.start_new_run(args.seed)?;
    }

    println!("\n=== CASTAWAY ISLE ===");
    println!("Washed ashore with a seed of {}. Gather, build, escape.", args.seed);
    println!();
    print_help(&game);

    loop {
        report_events(&mut game);
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or("");
        let arg = parts.next();

        match command {
            "quit" | "q" => {
                game.transition_to(GamePhase::Exit);
                break;
            }
            "tick" | "t" => {
                game.step();
            }
            "run" => match arg.and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    for _ in 0..n {
                        game.step();
                    }
                    println!("Ran {} ticks. Now at tick {}.", n, game.current_tick());
                }
                None => println!("Usage: run <ticks>"),
            },
            "wait" => match arg.and_then(|secs| secs.parse::<f32>().ok()) {
                Some(secs) => {
                    let before = game.current_tick();
                    game.update(secs);
                    println!(
                        "Waited {:.1}s of island time ({} ticks).",
                        secs,
                        game.current_tick() - before
                    );
                }
                None => println!("Usage: wait <seconds>"),
            },
            "speed" => match arg.and_then(|s| s.parse::<f32>().ok()) {
                Some(multiplier) => game.set_speed(multiplier),
                None => println!("Usage: speed <multiplier>"),
            },
            "status" | "s" => print_status(&game),
            "upgrades" | "u" => print_upgrades(&game),
            "buy" => match arg {
                Some(id) => {
                    if game.try_buy_upgrade(id) {
                        println!("Bought {}.", id);
                    } else {
                        println!("Cannot buy {}.", id);
                    }
                }
                None => println!("Usage: buy <upgrade id>"),
            },
            "escape" | "e" => {
                if game.attempt_escape() {
                    println!(
                        "The raft grows. Escape progress: {:.0}%",
                        game.escape_progress() * 100.0
                    );
                } else {
                    println!("Not enough supplies for an escape attempt.");
                }
            }
            "pause" => game.transition_to(GamePhase::Pause),
            "resume" => game.transition_to(GamePhase::Running),
            "save" => game.force_save(),
            "load" => {
                game.load_game(args.seed)?;
            }
            "new" => {
                let seed = arg.and_then(|s| s.parse::<u64>().ok()).unwrap_or(args.seed);
                game.start_new_run(seed)?;
                println!("A new island rises from the sea (seed {}).", seed);
            }
            "help" | "h" => print_help(&game),
            _ => println!("Unknown command. Try 'help'."),
        }

        if game.phase() == GamePhase::Won {
            report_events(&mut game);
            println!("\nYou made it off the island after {} ticks!", game.current_tick());
            break;
        }
    }

    println!(
        "\nGoodbye. Final state: tick {}, escape progress {:.0}%.",
        game.current_tick(),
        game.escape_progress() * 100.0
    );
    Ok(())
}

fn print_help(game: &RunController) {
    println!("Commands:");
    println!("  tick / t        - Advance the simulation one tick");
    println!("  run <n>         - Advance n ticks");
    println!("  wait <secs>     - Feed real seconds to the scheduler");
    println!("  speed <x>       - Set the speed multiplier {:?}", game.config().speed_levels);
    println!("  status / s      - Show the run state");
    println!("  upgrades / u    - List upgrades");
    println!("  buy <id>        - Buy an upgrade");
    println!("  escape / e      - Spend supplies on the escape raft");
    println!("  pause / resume  - Toggle the scheduler");
    println!("  save / load     - Manage the save slot");
    println!("  new [seed]      - Abandon the run and start over");
    println!("  quit / q        - Save and exit");
    println!();
}

fn print_status(game: &RunController) {
    println!();
    println!(
        "--- Tick {} | {:?} | Escape {:.0}% ---",
        game.current_tick(),
        game.phase(),
        game.escape_progress() * 100.0
    );
    for def in game.resource_catalog().iter() {
        println!(
            "  {:<8} {:>7.1} / {:.0}",
            def.display_name,
            game.resource(&def.id),
            def.max_amount
        );
    }
    if let Some(island) = game.island() {
        let reachable = island
            .nodes()
            .iter()
            .filter(|node| {
                node.amount > 0.0
                    && island
                        .spawn()
                        .distance(&castaway_isle::core::types::GridPos::new(node.x, node.y))
                        <= game.config().gather_radius
            })
            .count();
        println!("  {} live nodes in gather range", reachable);
    }
    println!();
}

fn print_upgrades(game: &RunController) {
    println!();
    for def in game.upgrade_catalog().iter() {
        let owned = if game.is_upgrade_owned(&def.id) {
            " [owned]"
        } else {
            ""
        };
        let cost: Vec<String> = def
            .cost
            .iter()
            .map(|(res, amt)| format!("{} {:.0}", res, amt))
            .collect();
        println!("  {}{} - {}", def.id, owned, def.display_name);
        println!("      cost: {}", cost.join(", "));
        if !def.description.is_empty() {
            println!("      {}", def.description);
        }
    }
    println!();
}

fn report_events(game: &mut RunController) {
    for event in game.drain_events() {
        match event {
            GameEvent::Storm {
                tick,
                resource_id,
                loss,
            } => println!("! A storm at tick {} washed away {:.1} {}", tick, loss, resource_id),
            GameEvent::Saved { tick } => println!("(saved at tick {})", tick),
            GameEvent::SaveFailed { tick } => println!("(save failed at tick {})", tick),
            GameEvent::StateChanged { from, to } => {
                println!("(state: {:?} -> {:?})", from, to)
            }
            GameEvent::RunWon { tick } => println!("*** Rescue! You escaped at tick {} ***", tick),
        }
    }
}

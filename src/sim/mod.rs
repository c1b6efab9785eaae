//! Tick scheduling, hazards, and run orchestration

pub mod controller;
pub mod hazard;
pub mod scheduler;
pub mod state;

pub use controller::{GameEvent, RunController};
pub use hazard::StormEvent;
pub use scheduler::{SchedulerState, TickScheduler};
pub use state::GamePhase;

//! Save slot persistence and autosave cadence

pub mod autosave;
pub mod data;
pub mod gateway;

pub use autosave::AutoSaveScheduler;
pub use data::{LoadedRun, PlayerState, RunState, SaveDocument, WorldState, SAVE_VERSION};
pub use gateway::{SaveError, SaveGateway};

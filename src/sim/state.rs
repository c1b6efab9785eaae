//! Run lifecycle state machine

use serde::{Deserialize, Serialize};

/// Top-level game state; exactly one is active at a time.
///
/// Won and GameOver are terminal in the sense that only an explicit new
/// run re-enters Running; Exit ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Boot,
    Running,
    Pause,
    Won,
    GameOver,
    Exit,
}

impl GamePhase {
    /// Whether a direct transition to `next` is allowed
    pub fn can_transition_to(&self, next: GamePhase) -> bool {
        use GamePhase::*;
        match (self, next) {
            (Boot, Running) => true,
            (Running, Pause) | (Pause, Running) => true,
            (Running, Won) | (Running, GameOver) => true,
            (_, Exit) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::GameOver | Self::Exit)
    }
}

//! Autosave cadence tracking

/// Counts ticks between persistence passes
#[derive(Debug, Clone)]
pub struct AutoSaveScheduler {
    every_n_ticks: u32,
    since_last: u32,
}

impl AutoSaveScheduler {
    /// `every_n_ticks` below 1 is clamped up to 1
    pub fn new(every_n_ticks: u32) -> Self {
        Self {
            every_n_ticks: every_n_ticks.max(1),
            since_last: 0,
        }
    }

    /// Count one tick; true when a save is due (the counter restarts)
    pub fn note_tick(&mut self) -> bool {
        self.since_last += 1;
        if self.since_last >= self.every_n_ticks {
            self.since_last = 0;
            true
        } else {
            false
        }
    }

    /// Restart the cadence (run bootstrap, or after a forced save)
    pub fn reset(&mut self) {
        self.since_last = 0;
    }

    pub fn interval(&self) -> u32 {
        self.every_n_ticks
    }
}

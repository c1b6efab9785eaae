//! Fixed-interval tick scheduling
//!
//! The scheduler never calls back into anything: `advance` returns how
//! many ticks fell due and the controller drains them, keeping control
//! flow linear. Manual `step` always fires exactly one tick, whatever
//! the run state or accumulator say.

use crate::core::types::Tick;

/// Catch-up bound: at most this many intervals may pile up while stalled
const MAX_ACCUMULATED_INTERVALS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Accumulates scaled real time and emits discrete ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: SchedulerState,
    /// Real seconds per tick at speed 1.0
    interval_secs: f32,
    speed: f32,
    accumulator: f32,
    tick: Tick,
}

impl TickScheduler {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            state: SchedulerState::Stopped,
            interval_secs,
            speed: 1.0,
            accumulator: 0.0,
            tick: 0,
        }
    }

    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Change pacing without touching the accumulator
    pub fn set_speed(&mut self, multiplier: f32) {
        if multiplier <= 0.0 {
            tracing::warn!(multiplier, "Ignoring non-positive speed multiplier");
            return;
        }
        self.speed = multiplier;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn interval_secs(&self) -> f32 {
        self.interval_secs
    }

    /// Rewind to a known tick. Only run bootstrap does this: 0 for a
    /// fresh run, the persisted tick for a load.
    pub fn reset(&mut self, tick: Tick) {
        self.tick = tick;
        self.accumulator = 0.0;
    }

    /// Feed elapsed real time; returns how many ticks fell due.
    ///
    /// The accumulator caps at five intervals so a long stall produces a
    /// bounded burst instead of an unbounded one.
    pub fn advance(&mut self, dt_secs: f32) -> u32 {
        if self.state != SchedulerState::Running {
            return 0;
        }
        self.accumulator += dt_secs.max(0.0) * self.speed;
        let cap = self.interval_secs * MAX_ACCUMULATED_INTERVALS;
        if self.accumulator > cap {
            self.accumulator = cap;
        }

        let mut fired = 0;
        while self.accumulator >= self.interval_secs {
            self.accumulator -= self.interval_secs;
            self.tick += 1;
            fired += 1;
        }
        fired
    }

    /// Fire one tick immediately, independent of state and accumulator
    pub fn step(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }
}

//! Operator control state for a running simulation.
//!
//! Shared between the run loop and whatever drives it (a signal handler,
//! a visualiser, a test). Every field is atomic so a controller thread can
//! stop the run or change its pace without locks.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::WorldConfig;

/// Reason why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEndReason {
    /// Reached the configured `max_generations`.
    GenerationLimitReached,
    /// An operator requested a stop.
    OperatorStop,
}

/// Run-time controls for [`run_generations`](crate::runner::run_generations).
#[derive(Debug)]
pub struct OperatorState {
    /// Set once a stop is requested.
    stop_requested: AtomicBool,
    /// Real-time pause between steps.
    step_interval_ms: AtomicU64,
    /// Generations to run (0 = unlimited).
    max_generations: u64,
    /// When the controls were created.
    started_at: DateTime<Utc>,
}

impl OperatorState {
    /// Controls with an explicit limit and pace.
    pub fn new(max_generations: u64, step_interval_ms: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            step_interval_ms: AtomicU64::new(step_interval_ms),
            max_generations,
            started_at: Utc::now(),
        }
    }

    /// Controls taken from the `world` config section.
    pub fn from_config(world: &WorldConfig) -> Self {
        Self::new(world.max_generations, world.step_interval_ms)
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop before the next step.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Pace
    // -----------------------------------------------------------------------

    /// Current pause between steps in milliseconds.
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms.load(Ordering::Acquire)
    }

    /// Current pause between steps, or `None` at full speed.
    pub fn step_interval(&self) -> Option<Duration> {
        match self.step_interval_ms() {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Change the pause between steps. Returns the previous value.
    pub fn set_step_interval_ms(&self, ms: u64) -> u64 {
        self.step_interval_ms.swap(ms, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Configured generation limit (0 = unlimited).
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Whether `completed` generations satisfy the limit.
    ///
    /// Returns `true` if `max_generations > 0` and `completed >= max_generations`.
    pub const fn generation_limit_reached(&self, completed: u64) -> bool {
        self.max_generations > 0 && completed >= self.max_generations
    }

    /// When the controls were created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

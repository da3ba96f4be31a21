//! Run callback that reports progress through tracing.
//!
//! Ticks are counted and surfaced at `trace`; each generation is checked
//! against the best seen so far and improvements are logged at `info`.

use sweeper_core::runner::GenerationCallback;
use sweeper_core::scheduler::TickSummary;
use sweeper_types::GenerationRecord;
use tracing::{info, trace};

/// Callback that tracks the best generation of the run.
#[derive(Debug, Default)]
pub struct ProgressCallback {
    ticks: u64,
    best: Option<GenerationRecord>,
}

impl ProgressCallback {
    /// Fresh callback with nothing seen.
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            best: None,
        }
    }

    /// Ticks seen so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Best generation seen so far.
    pub const fn best(&self) -> Option<&GenerationRecord> {
        self.best.as_ref()
    }
}

impl GenerationCallback for ProgressCallback {
    fn on_tick(&mut self, summary: &TickSummary) {
        self.ticks = self.ticks.saturating_add(1);
        trace!(
            generation = summary.generation,
            tick = summary.tick,
            processed = summary.processed,
            gathered = summary.gathered,
            killed = summary.killed,
            "Tick"
        );
    }

    fn on_generation(&mut self, record: &GenerationRecord) {
        let improved = self
            .best
            .is_none_or(|best| record.max_fitness > best.max_fitness);
        if improved {
            info!(
                generation = record.generation,
                max_fitness = record.max_fitness,
                mean_fitness = record.mean_fitness,
                "New best generation"
            );
            self.best = Some(*record);
        }
    }
}

//! Generation loop runner with operator controls.
//!
//! This module provides [`run_generations`], the synchronous loop that
//! drives [`Simulation::step`] with support for:
//!
//! - **Bounded runs**: stop after `max_generations` completed generations
//! - **Operator stop**: clean stop between steps via [`OperatorState`]
//! - **Pacing**: optional real-time pause between steps for visualisation
//! - **Run metadata**: run id and wall-clock start/finish in [`RunSummary`]

use std::io::Write;

use chrono::{DateTime, Utc};
use sweeper_agents::Sweeper;
use sweeper_types::GenerationRecord;
use tracing::{info, warn};
use uuid::Uuid;

use crate::operator::{OperatorState, RunEndReason};
use crate::scheduler::{Simulation, StepError, StepOutcome, TickSummary};

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: StepError,
    },
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Time-ordered identifier of this run.
    pub run_id: Uuid,
    /// Why the run ended.
    pub end_reason: RunEndReason,
    /// Generations completed during this run.
    pub generations_completed: u64,
    /// Steps executed (ticks plus generation boundaries).
    pub total_steps: u64,
    /// Best generation in the simulation's history, if any completed.
    pub best: Option<GenerationRecord>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

/// Callback invoked as the run progresses.
///
/// Implementations can feed a renderer, a stats plot or a learner.
pub trait GenerationCallback {
    /// Called after each tick.
    fn on_tick(&mut self, _summary: &TickSummary) {}

    /// Called after each generation boundary, once the arena is reset.
    fn on_generation(&mut self, record: &GenerationRecord);
}

/// A no-op callback for headless runs and tests.
pub struct NoOpCallback;

impl GenerationCallback for NoOpCallback {
    fn on_generation(&mut self, _record: &GenerationRecord) {}
}

/// Step `sim` until the generation limit or an operator stop.
///
/// Controls are checked before every step, so a stop lands between steps
/// and never inside a tick.
///
/// # Errors
///
/// Returns [`RunnerError::Step`] if a step fails. The simulation is halted
/// at that point.
pub fn run_generations<A: Sweeper, W: Write>(
    sim: &mut Simulation<A, W>,
    operator: &OperatorState,
    callback: &mut dyn GenerationCallback,
) -> Result<RunSummary, RunnerError> {
    let run_id = Uuid::now_v7();
    let started_at = Utc::now();
    let mut generations_completed: u64 = 0;
    let mut total_steps: u64 = 0;

    info!(
        %run_id,
        generation = sim.clock().generation(),
        ticks_per_generation = sim.clock().ticks_per_generation(),
        max_generations = operator.max_generations(),
        step_interval_ms = operator.step_interval_ms(),
        "Run starting"
    );

    let end_reason = loop {
        if operator.is_stop_requested() {
            info!(%run_id, "Operator stop requested");
            break RunEndReason::OperatorStop;
        }
        if operator.generation_limit_reached(generations_completed) {
            info!(%run_id, generations_completed, "Generation limit reached");
            break RunEndReason::GenerationLimitReached;
        }

        let outcome = sim.step()?;
        total_steps = total_steps.saturating_add(1);

        match outcome {
            StepOutcome::Tick(summary) => callback.on_tick(&summary),
            StepOutcome::GenerationCompleted(record) => {
                generations_completed = generations_completed.saturating_add(1);
                callback.on_generation(&record);
            }
        }

        if let Some(interval) = operator.step_interval() {
            std::thread::sleep(interval);
        }
    };

    Ok(RunSummary {
        run_id,
        end_reason,
        generations_completed,
        total_steps,
        best: sim.history().best_generation().copied(),
        started_at,
        finished_at: Utc::now(),
    })
}

/// Log the end of a run.
pub fn log_run_end(summary: &RunSummary) {
    let elapsed_ms = summary
        .finished_at
        .signed_duration_since(summary.started_at)
        .num_milliseconds();

    info!(
        run_id = %summary.run_id,
        reason = ?summary.end_reason,
        generations = summary.generations_completed,
        total_steps = summary.total_steps,
        elapsed_ms,
        "Run ended"
    );

    if let Some(best) = summary.best {
        info!(
            generation = best.generation,
            max_fitness = best.max_fitness,
            mean_fitness = best.mean_fitness,
            "Best generation"
        );
    } else {
        warn!("Run ended with no completed generation");
    }
}

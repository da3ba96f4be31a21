//! Generation scheduler: the step-driven state machine of the simulation.
//!
//! Each call to [`Simulation::step`] does exactly one of two things:
//!
//! 1. **Tick** -- while ticks remain in the generation, advance the clock
//!    and resolve every live sweeper against the world objects, in
//!    population order.
//!
//! 2. **Generation boundary** -- once the budget is spent, aggregate the
//!    population into a [`GenerationRecord`], append it to history and the
//!    generation log, start the next generation, and reset every sweeper
//!    and object.
//!
//! A generation therefore spans `ticks_per_generation + 1` steps. The only
//! fatal condition is a sweeper whose update fails; the scheduler halts and
//! refuses every later step.

use std::fs::File;
use std::io::{BufWriter, Write};

use sweeper_agents::{AgentError, Sweeper};
use sweeper_types::{GenerationRecord, WorldSnapshot};
use tracing::{debug, info, warn};

use crate::arena::Arena;
use crate::clock::{ClockError, Phase, SimulationClock};
use crate::interaction::{self, Interaction};
use crate::log_sink::{GenerationLog, LogError};
use crate::snapshot;
use crate::stats::{self, FitnessHistory};

/// Errors that stop the scheduler.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A sweeper's update reported failure.
    #[error("sweeper {index} update failed: {source}")]
    AgentUpdate {
        /// Population index of the failing sweeper.
        index: usize,
        /// The underlying agent error.
        source: AgentError,
    },

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// An earlier step failed; the scheduler no longer runs.
    #[error("scheduler halted after an earlier failure")]
    Halted,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Generation the tick belongs to.
    pub generation: u64,
    /// Tick number within the generation (1-based).
    pub tick: u32,
    /// Live sweepers resolved this tick.
    pub processed: u32,
    /// Mines gathered this tick.
    pub gathered: u32,
    /// Sweepers killed this tick.
    pub killed: u32,
    /// Objects destroyed this tick (mines and super-mines).
    pub objects_destroyed: u32,
}

/// What a successful step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A tick ran.
    Tick(TickSummary),
    /// The generation boundary ran and produced this record.
    GenerationCompleted(GenerationRecord),
}

/// Arena, clock, history and generation log driven one step at a time.
#[derive(Debug)]
pub struct Simulation<A, W: Write = BufWriter<File>> {
    arena: Arena<A>,
    clock: SimulationClock,
    history: FitnessHistory,
    log: GenerationLog<W>,
    detection_scale: f64,
    halted: bool,
}

impl<A: Sweeper, W: Write> Simulation<A, W> {
    /// Assemble a simulation at the clock's current position.
    pub fn new(
        arena: Arena<A>,
        clock: SimulationClock,
        log: GenerationLog<W>,
        detection_scale: f64,
    ) -> Self {
        Self {
            arena,
            clock,
            history: FitnessHistory::new(),
            log,
            detection_scale,
            halted: false,
        }
    }

    /// Advance the simulation by one discrete step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::AgentUpdate`] the first time a sweeper's update
    /// fails, and [`StepError::Halted`] on every call after that. Sweepers
    /// resolved earlier in the failing tick keep their changes.
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        if self.halted {
            return Err(StepError::Halted);
        }

        let outcome = match self.clock.phase() {
            Phase::RunningTicks => self.run_tick().map(StepOutcome::Tick),
            Phase::GenerationBoundary => {
                self.finish_generation().map(StepOutcome::GenerationCompleted)
            }
        };

        if outcome.is_err() {
            self.halted = true;
        }
        outcome
    }

    fn run_tick(&mut self) -> Result<TickSummary, StepError> {
        let tick = self.clock.advance_tick()?;
        let mut summary = TickSummary {
            generation: self.clock.generation(),
            tick,
            ..TickSummary::default()
        };

        let scale = self.detection_scale;
        let (sweepers, objects) = self.arena.parts_mut();

        for (index, sweeper) in sweepers.iter_mut().enumerate() {
            if !sweeper.is_alive() {
                continue;
            }

            let interaction = interaction::resolve(sweeper, objects, scale).map_err(|source| {
                warn!(tick, index, %source, "Sweeper update failed, halting");
                StepError::AgentUpdate { index, source }
            })?;

            summary.processed = summary.processed.saturating_add(1);
            if interaction.credited() {
                summary.gathered = summary.gathered.saturating_add(1);
            }
            if interaction.killed_sweeper() {
                summary.killed = summary.killed.saturating_add(1);
            }
            if interaction.consumed_object() {
                summary.objects_destroyed = summary.objects_destroyed.saturating_add(1);
            }
            if interaction != Interaction::None {
                debug!(tick, index, ?interaction, "Sweeper touched an object");
            }
        }

        debug!(
            generation = summary.generation,
            tick,
            processed = summary.processed,
            gathered = summary.gathered,
            killed = summary.killed,
            "Tick complete"
        );
        Ok(summary)
    }

    fn finish_generation(&mut self) -> Result<GenerationRecord, StepError> {
        let generation = self.clock.generation();
        let record = stats::aggregate(generation, self.arena.sweepers());

        self.history.push(record);
        self.append_to_log(&record);

        self.clock.start_next_generation()?;
        self.arena.reset_all();

        info!(
            generation,
            mean_fitness = record.mean_fitness,
            max_fitness = record.max_fitness,
            deaths = record.deaths,
            "Generation complete"
        );
        Ok(record)
    }

    fn append_to_log(&mut self, record: &GenerationRecord) {
        if let Err(err) = self.log.append(record) {
            warn!(generation = record.generation, %err, "Generation log write failed, closing log");
            if let Err(close_err) = self.log.close() {
                warn!(%close_err, "Generation log close failed");
            }
        }
    }

    /// Capture the current state for an external renderer.
    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot::capture(&self.arena, &self.clock)
    }

    /// Arena state.
    pub const fn arena(&self) -> &Arena<A> {
        &self.arena
    }

    /// Mutable arena, for a learner adjusting sweepers between generations.
    pub const fn arena_mut(&mut self) -> &mut Arena<A> {
        &mut self.arena
    }

    /// Clock state.
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Every completed generation's record.
    pub const fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Generation log state.
    pub const fn log(&self) -> &GenerationLog<W> {
        &self.log
    }

    /// Whether a failed step halted the scheduler.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Close the generation log and hand back its writer.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the final flush fails.
    pub fn close_log(&mut self) -> Result<Option<W>, LogError> {
        self.log.close()
    }
}

//! Simulation clock for the generational controller.
//!
//! The clock is the single source of truth for temporal state: the tick
//! within the current generation and the generation index. It does not
//! decide what a step does; the scheduler asks it whether the tick budget
//! is exhausted and advances it accordingly.
//!
//! # Design Principles
//!
//! - All counter updates use checked arithmetic (no silent overflow).
//! - The tick counter never exceeds the budget. Reaching the budget puts
//!   the clock at the generation boundary.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick would advance past the generation budget.
    #[error("tick counter overflow: budget of {budget} ticks already reached")]
    TickOverflow {
        /// Configured ticks per generation.
        budget: u32,
    },

    /// Generation counter would overflow.
    #[error("generation counter overflow: cannot advance beyond u64::MAX")]
    GenerationOverflow,

    /// Invalid clock configuration (e.g. a zero tick budget).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Phase of the generation state machine implied by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ticks remain in the current generation.
    RunningTicks,
    /// The budget is spent; the next step aggregates and resets.
    GenerationBoundary,
}

/// Tick and generation counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    /// Ticks elapsed in the current generation (`0..=ticks_per_generation`).
    tick: u32,

    /// Zero-based index of the running generation.
    generation: u64,

    /// Tick budget per generation (from configuration).
    ticks_per_generation: u32,
}

impl SimulationClock {
    /// Create a clock at tick 0 of generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `ticks_per_generation` is 0.
    pub fn new(ticks_per_generation: u32) -> Result<Self, ClockError> {
        Self::from_parts(0, 0, ticks_per_generation)
    }

    /// Create a clock from explicit parameters (useful for testing and
    /// state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the budget is 0 or `tick`
    /// lies beyond it.
    pub fn from_parts(
        tick: u32,
        generation: u64,
        ticks_per_generation: u32,
    ) -> Result<Self, ClockError> {
        if ticks_per_generation == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "ticks_per_generation must be at least 1".to_owned(),
            });
        }
        if tick > ticks_per_generation {
            return Err(ClockError::InvalidConfig {
                reason: format!("tick {tick} exceeds budget {ticks_per_generation}"),
            });
        }
        Ok(Self {
            tick,
            generation,
            ticks_per_generation,
        })
    }

    /// Ticks elapsed in the current generation.
    pub const fn tick(&self) -> u32 {
        self.tick
    }

    /// Zero-based index of the running generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Configured tick budget.
    pub const fn ticks_per_generation(&self) -> u32 {
        self.ticks_per_generation
    }

    /// Ticks left before the generation boundary.
    pub const fn ticks_remaining(&self) -> u32 {
        self.ticks_per_generation.saturating_sub(self.tick)
    }

    /// Which state the next step will run in.
    pub const fn phase(&self) -> Phase {
        if self.tick < self.ticks_per_generation {
            Phase::RunningTicks
        } else {
            Phase::GenerationBoundary
        }
    }

    /// Advance one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the budget is already spent.
    pub fn advance_tick(&mut self) -> Result<u32, ClockError> {
        if self.phase() == Phase::GenerationBoundary {
            return Err(ClockError::TickOverflow {
                budget: self.ticks_per_generation,
            });
        }
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow {
            budget: self.ticks_per_generation,
        })?;
        Ok(self.tick)
    }

    /// Start the next generation: tick back to 0, generation + 1.
    /// Returns the new generation index.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::GenerationOverflow`] if the generation counter
    /// would exceed `u64::MAX`. The clock is unchanged in that case.
    pub fn start_next_generation(&mut self) -> Result<u64, ClockError> {
        let next = self
            .generation
            .checked_add(1)
            .ok_or(ClockError::GenerationOverflow)?;
        self.generation = next;
        self.tick = 0;
        Ok(next)
    }
}

//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the run.

use sweeper_core::arena::ArenaError;
use sweeper_core::clock::ClockError;
use sweeper_core::config::ConfigError;
use sweeper_core::log_sink::LogError;
use sweeper_core::runner::RunnerError;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Arena construction failed.
    #[error("arena error: {source}")]
    Arena {
        /// The underlying arena error.
        #[from]
        source: ArenaError,
    },

    /// Simulation clock initialization failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The generation log could not be opened or closed.
    #[error("generation log error: {source}")]
    Log {
        /// The underlying log error.
        #[from]
        source: LogError,
    },

    /// The run stopped on a failed step.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: RunnerError,
    },

    /// Population spawning failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}

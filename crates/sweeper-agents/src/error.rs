//! Error types for the sweeper-agents crate.
//!
//! A failed [`Sweeper::update`](crate::sweeper::Sweeper::update) is the one
//! fatal condition of the generation controller, so every error here
//! ultimately halts the simulation step that produced it.

/// Errors that can occur while updating a sweeper.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The sweeper's control logic could not produce an output this tick.
    #[error("sweeper update failed: {reason}")]
    UpdateFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The steering strategy rejected its inputs or produced garbage.
    #[error("steering failed: {reason}")]
    Steering {
        /// Description of what went wrong.
        reason: String,
    },

    /// Moving the sweeper produced an unrepresentable position.
    #[error("arithmetic overflow moving sweeper")]
    ArithmeticOverflow,
}

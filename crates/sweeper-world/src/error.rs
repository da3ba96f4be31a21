//! Error types for the `sweeper-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type.

/// Errors that can occur while building or querying the arena.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid cell dimension was zero.
    #[error("grid cell size must be at least 1")]
    ZeroCellSize,

    /// An arena extent is not an exact multiple of the cell dimension.
    #[error("arena {axis} {extent} is not a multiple of cell size {cell}")]
    NotGridAligned {
        /// Which extent failed (`"width"` or `"height"`).
        axis: &'static str,
        /// The offending extent.
        extent: u32,
        /// The configured cell dimension.
        cell: u32,
    },

    /// An arena extent is zero or does not fit signed coordinates.
    #[error("arena {axis} {extent} is out of range")]
    ExtentOutOfRange {
        /// Which extent failed (`"width"` or `"height"`).
        axis: &'static str,
        /// The offending extent.
        extent: u32,
    },

    /// No world object exists at the given index.
    #[error("world object not found at index {0}")]
    ObjectNotFound(usize),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}

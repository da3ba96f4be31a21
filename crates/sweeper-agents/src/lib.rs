//! Sweeper agents for the Sweepers simulation.
//!
//! The generation controller treats agents as opaque: it only needs the
//! [`Sweeper`] contract. This crate defines that contract and ships a
//! reference implementation so the controller can run without an external
//! learning system attached.
//!
//! # Modules
//!
//! - [`detection`] -- Nearest-live-object geometry shared by implementations
//! - [`error`] -- Error types for sweeper updates ([`AgentError`])
//! - [`grid_sweeper`] -- [`GridSweeper`], a cell-stepping reference sweeper
//! - [`steering`] -- [`Steering`] strategies: random walk, homing, scripted
//! - [`sweeper`] -- The [`Sweeper`] trait consumed by the controller

pub mod detection;
pub mod error;
pub mod grid_sweeper;
pub mod steering;
pub mod sweeper;

// Re-export primary types at crate root for convenience.
pub use detection::{nearest_offset, nearest_within};
pub use error::AgentError;
pub use grid_sweeper::GridSweeper;
pub use steering::{Homing, RandomWalk, Scripted, Senses, SteerAction, Steering};
pub use sweeper::Sweeper;

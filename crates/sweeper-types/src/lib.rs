//! Shared type definitions for the Sweepers simulation.
//!
//! This crate is the single source of truth for the value types passed
//! between the world, the agents, the generation controller, and external
//! renderers. Types defined here flow downstream to `TypeScript` via `ts-rs`
//! so a visualiser can consume [`WorldSnapshot`] and [`GenerationRecord`]
//! without a hand-written schema.
//!
//! # Modules
//!
//! - [`enums`] -- Object kinds and sweeper headings
//! - [`structs`] -- Positions, generation records, renderer snapshots

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Heading, ObjectKind};
pub use structs::{GenerationRecord, GridPosition, ObjectView, SweeperView, WorldSnapshot};

//! Arena geometry and static world objects for the Sweepers simulation.
//!
//! This crate models the physical world the sweepers move through: a
//! grid-aligned rectangular arena and the mines, super-mines, and rocks
//! scattered across it.
//!
//! # Modules
//!
//! - [`bounds`] -- [`ArenaBounds`] validates the arena against the grid and
//!   draws random cells.
//! - [`error`] -- Error types for arena construction and queries.
//! - [`object`] -- [`WorldObject`], the static collectible/hazard entity.
//! - [`placement`] -- Seeded, grid-aligned layout of all objects.

pub mod bounds;
pub mod error;
pub mod object;
pub mod placement;

// Re-export primary types at crate root.
pub use bounds::ArenaBounds;
pub use error::WorldError;
pub use object::WorldObject;
pub use placement::{ObjectCounts, place_objects, place_seeded};

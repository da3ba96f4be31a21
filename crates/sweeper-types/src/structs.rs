//! Core value structs for the Sweepers simulation.
//!
//! Covers grid positions, the per-generation fitness record, and the
//! read-only snapshot handed to external renderers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Heading, ObjectKind};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A position in arena units.
///
/// World objects always sit on multiples of the grid cell dimension;
/// sweepers may sit anywhere their implementation chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridPosition {
    /// Horizontal coordinate, growing rightward.
    pub x: i32,
    /// Vertical coordinate, growing downward.
    pub y: i32,
}

impl GridPosition {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Computed in `i64` so that no pair of `i32` coordinates can overflow.
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(other.x).saturating_sub(i64::from(self.x));
        let dy = i64::from(other.y).saturating_sub(i64::from(self.y));
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl core::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Generation statistics
// ---------------------------------------------------------------------------

/// Aggregate fitness of one completed generation.
///
/// Immutable once produced. The [`Display`](core::fmt::Display) form is the
/// generation log line: `generation,mean_fitness,max_fitness,deaths`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GenerationRecord {
    /// Zero-based index of the generation this record describes.
    pub generation: u64,
    /// Sum of fitness divided by population size.
    pub mean_fitness: f64,
    /// Highest fitness in the population, or `-1` for an empty population.
    pub max_fitness: i64,
    /// Sweepers that were dead when the generation ended.
    pub deaths: u32,
}

impl GenerationRecord {
    /// Sentinel reported as `max_fitness` when there were no sweepers.
    pub const NO_SWEEPERS: i64 = -1;
}

impl core::fmt::Display for GenerationRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},", self.generation)?;
        // Whole means still print one decimal place.
        if self.mean_fitness.fract().abs() < f64::EPSILON {
            write!(f, "{:.1}", self.mean_fitness)?;
        } else {
            write!(f, "{}", self.mean_fitness)?;
        }
        write!(f, ",{},{}", self.max_fitness, self.deaths)
    }
}

// ---------------------------------------------------------------------------
// Renderer snapshot
// ---------------------------------------------------------------------------

/// Read-only view of one world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ObjectView {
    /// What the object is.
    pub kind: ObjectKind,
    /// Where it sits.
    pub position: GridPosition,
    /// Whether it is still in play this generation.
    pub alive: bool,
}

/// Read-only view of one sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SweeperView {
    /// Current position.
    pub position: GridPosition,
    /// Current facing.
    pub heading: Heading,
    /// Whether the sweeper is still active this generation.
    pub alive: bool,
    /// Objects gathered so far.
    pub fitness: u32,
    /// Whether the sweeper falls within the configured elite count.
    pub elite: bool,
}

/// Everything an external renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Generation currently running.
    pub generation: u64,
    /// Ticks elapsed in the current generation.
    pub tick: u32,
    /// Arena width in arena units.
    pub width: u32,
    /// Arena height in arena units.
    pub height: u32,
    /// All world objects in arena order.
    pub objects: Vec<ObjectView>,
    /// All sweepers in population order.
    pub sweepers: Vec<SweeperView>,
}

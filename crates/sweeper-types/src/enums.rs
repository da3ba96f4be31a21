//! Enumeration types for the Sweepers simulation.
//!
//! Object kinds are a closed set: every consumer that dispatches on
//! [`ObjectKind`] is checked for exhaustiveness by the compiler.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// World object kinds
// ---------------------------------------------------------------------------

/// The kind of a static world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ObjectKind {
    /// Collectible. Gathering one credits the sweeper and consumes the mine.
    Mine,
    /// Hazard. Lethal to the sweeper, never consumed.
    Rock,
    /// Hazard. Destroys both the sweeper and itself, with no credit.
    SuperMine,
}

impl ObjectKind {
    /// Every object kind, in placement order.
    pub const ALL: [Self; 3] = [Self::Mine, Self::SuperMine, Self::Rock];

    /// Lowercase label used in logs and snapshots.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Rock => "rock",
            Self::SuperMine => "super_mine",
        }
    }
}

impl core::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Grid-aligned facing of a sweeper.
///
/// Screen coordinates: `y` grows downward, so [`Heading::North`] steps
/// toward smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Heading {
    /// Facing toward smaller `y`.
    #[default]
    North,
    /// Facing toward larger `x`.
    East,
    /// Facing toward larger `y`.
    South,
    /// Facing toward smaller `x`.
    West,
}

impl Heading {
    /// Unit step `(dx, dy)` in grid cells for one move forward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Heading after a quarter turn counter-clockwise.
    pub const fn turned_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Heading after a quarter turn clockwise.
    pub const fn turned_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }
}

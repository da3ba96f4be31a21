//! Static world objects: mines, rocks, and super-mines.
//!
//! A [`WorldObject`] never moves. Within a generation it can only go from
//! alive to dead; [`WorldObject::reset`] brings it back for the next one.

use sweeper_types::{GridPosition, ObjectKind, ObjectView};

/// A collectible or hazardous object placed in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldObject {
    /// What the object is. Fixed at creation.
    kind: ObjectKind,
    /// Where the object sits. Fixed at creation.
    position: GridPosition,
    /// Whether the object is still in play this generation.
    alive: bool,
}

impl WorldObject {
    /// Create a live object of `kind` at `position`.
    pub const fn new(kind: ObjectKind, position: GridPosition) -> Self {
        Self {
            kind,
            position,
            alive: true,
        }
    }

    /// Return the object kind.
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Return the object position.
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Whether the object is still in play.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Take the object out of play until the next reset.
    pub const fn die(&mut self) {
        self.alive = false;
    }

    /// Bring the object back into play. Idempotent.
    pub const fn reset(&mut self) {
        self.alive = true;
    }

    /// Read-only view for renderers.
    pub const fn view(&self) -> ObjectView {
        ObjectView {
            kind: self.kind,
            position: self.position,
            alive: self.alive,
        }
    }
}

//! Per-tick interaction between one live sweeper and the world objects.
//!
//! The resolver runs the sweeper's own update, asks it which object it is
//! touching, and applies the consequence for that object's kind. Kinds map
//! to consequences through a `const` table, so adding a kind is a compile
//! error until the table covers it.

use sweeper_agents::{AgentError, Sweeper};
use sweeper_types::ObjectKind;
use sweeper_world::WorldObject;
use tracing::{debug, warn};

/// What touching an object of a given kind does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consequence {
    /// The sweeper's fitness goes up by one.
    pub credit: bool,
    /// The sweeper dies.
    pub kill_sweeper: bool,
    /// The object dies.
    pub consume_object: bool,
}

/// Consequence table keyed by object kind.
pub const fn consequence_of(kind: ObjectKind) -> Consequence {
    match kind {
        ObjectKind::Mine => Consequence {
            credit: true,
            kill_sweeper: false,
            consume_object: true,
        },
        ObjectKind::Rock => Consequence {
            credit: false,
            kill_sweeper: true,
            consume_object: false,
        },
        ObjectKind::SuperMine => Consequence {
            credit: false,
            kill_sweeper: true,
            consume_object: true,
        },
    }
}

/// Outcome of resolving one sweeper for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing within detection range.
    None,
    /// The candidate was already dead this generation.
    AlreadyConsumed {
        /// Index of the dead object.
        object: usize,
    },
    /// A mine was gathered.
    Gathered {
        /// Index of the mine.
        object: usize,
    },
    /// The sweeper ran into a rock.
    StruckRock {
        /// Index of the rock.
        object: usize,
    },
    /// The sweeper set off a super-mine.
    Detonated {
        /// Index of the super-mine.
        object: usize,
    },
}

impl Interaction {
    const fn contact(kind: ObjectKind, object: usize) -> Self {
        match kind {
            ObjectKind::Mine => Self::Gathered { object },
            ObjectKind::Rock => Self::StruckRock { object },
            ObjectKind::SuperMine => Self::Detonated { object },
        }
    }

    /// Whether this outcome killed the sweeper.
    pub const fn killed_sweeper(self) -> bool {
        matches!(self, Self::StruckRock { .. } | Self::Detonated { .. })
    }

    /// Whether this outcome credited the sweeper.
    pub const fn credited(self) -> bool {
        matches!(self, Self::Gathered { .. })
    }

    /// Whether this outcome killed an object.
    pub const fn consumed_object(self) -> bool {
        matches!(self, Self::Gathered { .. } | Self::Detonated { .. })
    }
}

/// Resolve one live sweeper for the current tick.
///
/// Calls `update`, then `detect` with `scale`, then applies the
/// consequence of the detected object. A candidate index past the end of
/// `objects` counts as nothing detected.
///
/// # Errors
///
/// Propagates the sweeper's [`AgentError`] if its update fails. Nothing is
/// detected or applied in that case.
pub fn resolve<A: Sweeper + ?Sized>(
    sweeper: &mut A,
    objects: &mut [WorldObject],
    scale: f64,
) -> Result<Interaction, AgentError> {
    sweeper.update(objects)?;

    let Some(index) = sweeper.detect(objects, scale) else {
        return Ok(Interaction::None);
    };

    let Some(object) = objects.get_mut(index) else {
        warn!(index, objects = objects.len(), "Detected object index out of range");
        return Ok(Interaction::None);
    };

    if !object.is_alive() {
        return Ok(Interaction::AlreadyConsumed { object: index });
    }

    let kind = object.kind();
    let consequence = consequence_of(kind);

    if consequence.credit {
        sweeper.increment_fitness();
    }
    if consequence.consume_object {
        object.die();
    }
    if consequence.kill_sweeper {
        sweeper.die();
    }

    debug_assert!(
        !consequence.consume_object || !object.is_alive(),
        "object {index} survived a consuming interaction"
    );

    debug!(
        object = index,
        %kind,
        position = %object.position(),
        fitness = sweeper.fitness(),
        alive = sweeper.is_alive(),
        "Interaction resolved"
    );

    Ok(Interaction::contact(kind, index))
}

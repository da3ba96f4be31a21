//! The agent contract consumed by the generation controller.
//!
//! The controller never looks inside a sweeper. It asks it to update, asks
//! it what it is touching, and tells it when it has died, gathered
//! something, or must reset. Anything implementing [`Sweeper`] can be
//! dropped into the population, whatever control strategy drives it.

use sweeper_types::{GridPosition, Heading, SweeperView};
use sweeper_world::WorldObject;

use crate::error::AgentError;

/// An autonomous agent searching the arena.
pub trait Sweeper {
    /// Advance the sweeper's own state by one tick.
    ///
    /// `objects` is the full world-object collection, dead entries included.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if the sweeper cannot process this tick. The
    /// controller treats this as unrecoverable and halts.
    fn update(&mut self, objects: &[WorldObject]) -> Result<(), AgentError>;

    /// Index of the single object this sweeper is touching, if any.
    ///
    /// `scale` is the detection radius in arena units. Implementations must
    /// pick at most one candidate and must do so deterministically.
    fn detect(&self, objects: &[WorldObject], scale: f64) -> Option<usize>;

    /// Whether the sweeper is still active this generation.
    fn is_alive(&self) -> bool;

    /// Deactivate the sweeper until the next reset.
    fn die(&mut self);

    /// Restore the starting position and orientation and clear death.
    ///
    /// Must not clear the fitness counter.
    fn reset(&mut self);

    /// Objects gathered so far.
    fn fitness(&self) -> u32;

    /// Credit one gathered object.
    fn increment_fitness(&mut self);

    /// Current position.
    fn position(&self) -> GridPosition;

    /// Current facing.
    fn heading(&self) -> Heading;

    /// Read-only view for renderers.
    fn view(&self, elite: bool) -> SweeperView {
        SweeperView {
            position: self.position(),
            heading: self.heading(),
            alive: self.is_alive(),
            fitness: self.fitness(),
            elite,
        }
    }
}

impl<T: Sweeper + ?Sized> Sweeper for Box<T> {
    fn update(&mut self, objects: &[WorldObject]) -> Result<(), AgentError> {
        (**self).update(objects)
    }

    fn detect(&self, objects: &[WorldObject], scale: f64) -> Option<usize> {
        (**self).detect(objects, scale)
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn die(&mut self) {
        (**self).die();
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn fitness(&self) -> u32 {
        (**self).fitness()
    }

    fn increment_fitness(&mut self) {
        (**self).increment_fitness();
    }

    fn position(&self) -> GridPosition {
        (**self).position()
    }

    fn heading(&self) -> Heading {
        (**self).heading()
    }
}

//! Reference sweeper that moves one grid cell at a time.
//!
//! A [`GridSweeper`] sits on cell origins, faces one of four headings, and
//! delegates every decision to its [`Steering`] strategy. Moving off an
//! edge wraps to the opposite side. Detection uses
//! [`nearest_within`](crate::detection::nearest_within).

use sweeper_types::{GridPosition, Heading, ObjectKind};
use sweeper_world::{ArenaBounds, WorldObject};
use tracing::debug;

use crate::detection;
use crate::error::AgentError;
use crate::steering::{Senses, SteerAction, Steering};
use crate::sweeper::Sweeper;

/// Grid-stepping sweeper driven by a pluggable strategy.
#[derive(Debug, Clone)]
pub struct GridSweeper<S> {
    /// Arena the sweeper lives in, used for stepping and wrapping.
    bounds: ArenaBounds,
    /// Position restored on reset.
    start_position: GridPosition,
    /// Heading restored on reset.
    start_heading: Heading,
    /// Current position.
    position: GridPosition,
    /// Current heading.
    heading: Heading,
    /// Whether the sweeper is active this generation.
    alive: bool,
    /// Objects gathered. Survives reset.
    fitness: u32,
    /// Decision logic.
    steering: S,
}

impl<S: Steering> GridSweeper<S> {
    /// Create a live sweeper at `start` facing `heading`.
    pub const fn new(bounds: ArenaBounds, start: GridPosition, heading: Heading, steering: S) -> Self {
        Self {
            bounds,
            start_position: start,
            start_heading: heading,
            position: start,
            heading,
            alive: true,
            fitness: 0,
            steering,
        }
    }

    /// Read the fitness counter and zero it.
    ///
    /// Reset deliberately leaves fitness alone; the learning step calls this
    /// once it has consumed the generation's score.
    pub const fn take_fitness(&mut self) -> u32 {
        let fitness = self.fitness;
        self.fitness = 0;
        fitness
    }

    /// Borrow the steering strategy.
    pub const fn steering(&self) -> &S {
        &self.steering
    }

    /// Mutably borrow the steering strategy (for an external learner).
    pub const fn steering_mut(&mut self) -> &mut S {
        &mut self.steering
    }

    /// Move to a new starting cell for subsequent resets.
    pub const fn set_start(&mut self, start: GridPosition, heading: Heading) {
        self.start_position = start;
        self.start_heading = heading;
    }

    /// Step one cell along the current heading, wrapping at the edges.
    fn step_forward(&mut self) -> Result<(), AgentError> {
        let cell = i32::try_from(self.bounds.cell_size()).map_err(|_err| AgentError::ArithmeticOverflow)?;
        let (dx, dy) = self.heading.delta();
        let x = dx
            .checked_mul(cell)
            .and_then(|step| self.position.x.checked_add(step))
            .ok_or(AgentError::ArithmeticOverflow)?;
        let y = dy
            .checked_mul(cell)
            .and_then(|step| self.position.y.checked_add(step))
            .ok_or(AgentError::ArithmeticOverflow)?;
        self.position = self.bounds.wrap(GridPosition::new(x, y));
        Ok(())
    }
}

impl<S: Steering> Sweeper for GridSweeper<S> {
    fn update(&mut self, objects: &[WorldObject]) -> Result<(), AgentError> {
        if !self.alive {
            return Ok(());
        }

        let senses = Senses {
            position: self.position,
            heading: self.heading,
            nearest_mine: detection::nearest_offset(self.position, objects, ObjectKind::Mine),
        };

        let action = self.steering.steer(&senses).inspect_err(|err| {
            debug!(position = %self.position, heading = ?self.heading, %err, "Steering failed");
        })?;

        match action {
            SteerAction::Forward => self.step_forward()?,
            SteerAction::TurnLeft => self.heading = self.heading.turned_left(),
            SteerAction::TurnRight => self.heading = self.heading.turned_right(),
            SteerAction::Hold => {}
        }
        Ok(())
    }

    fn detect(&self, objects: &[WorldObject], scale: f64) -> Option<usize> {
        detection::nearest_within(self.position, objects, scale)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn die(&mut self) {
        self.alive = false;
    }

    fn reset(&mut self) {
        self.position = self.start_position;
        self.heading = self.start_heading;
        self.alive = true;
    }

    fn fitness(&self) -> u32 {
        self.fitness
    }

    fn increment_fitness(&mut self) {
        self.fitness = self.fitness.saturating_add(1);
    }

    fn position(&self) -> GridPosition {
        self.position
    }

    fn heading(&self) -> Heading {
        self.heading
    }
}

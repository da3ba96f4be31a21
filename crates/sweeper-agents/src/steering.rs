//! Steering strategies for the reference [`GridSweeper`].
//!
//! A [`Steering`] implementation is the sweeper's "brain": each tick it is
//! shown a small [`Senses`] summary and returns one [`SteerAction`]. The
//! learning algorithm that would evolve these strategies lives outside this
//! workspace; the strategies here exist so the controller can run
//! end-to-end.
//!
//! [`GridSweeper`]: crate::grid_sweeper::GridSweeper

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sweeper_types::{GridPosition, Heading};

use crate::error::AgentError;

/// What a sweeper perceives at the start of its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Senses {
    /// Current position.
    pub position: GridPosition,
    /// Current facing.
    pub heading: Heading,
    /// Offset `(dx, dy)` to the nearest live mine, if any remain.
    pub nearest_mine: Option<(i32, i32)>,
}

/// One discrete movement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerAction {
    /// Move one cell in the current heading.
    Forward,
    /// Quarter turn counter-clockwise, no movement.
    TurnLeft,
    /// Quarter turn clockwise, no movement.
    TurnRight,
    /// Do nothing this tick.
    Hold,
}

/// Decision logic driving a sweeper.
pub trait Steering {
    /// Choose this tick's action.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Steering`] if no decision can be produced.
    fn steer(&mut self, senses: &Senses) -> Result<SteerAction, AgentError>;
}

// ---------------------------------------------------------------------------
// Random walk
// ---------------------------------------------------------------------------

/// Moves forward most of the time, otherwise turns at random.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    /// Seeded generator so a population replays identically.
    rng: StdRng,
    /// Probability of moving forward on a given tick.
    forward_bias: f64,
}

impl RandomWalk {
    /// Default probability of moving forward.
    pub const DEFAULT_FORWARD_BIAS: f64 = 0.7;

    /// Create a random walk with the default forward bias.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            forward_bias: Self::DEFAULT_FORWARD_BIAS,
        }
    }

    /// Create a random walk with an explicit forward bias in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Steering`] if `forward_bias` is outside `[0, 1]`.
    pub fn with_bias(seed: u64, forward_bias: f64) -> Result<Self, AgentError> {
        if !(0.0..=1.0).contains(&forward_bias) {
            return Err(AgentError::Steering {
                reason: format!("forward bias {forward_bias} outside [0, 1]"),
            });
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            forward_bias,
        })
    }
}

impl Steering for RandomWalk {
    fn steer(&mut self, _senses: &Senses) -> Result<SteerAction, AgentError> {
        if self.rng.random_bool(self.forward_bias) {
            return Ok(SteerAction::Forward);
        }
        if self.rng.random_bool(0.5) {
            Ok(SteerAction::TurnLeft)
        } else {
            Ok(SteerAction::TurnRight)
        }
    }
}

// ---------------------------------------------------------------------------
// Homing
// ---------------------------------------------------------------------------

/// Greedy strategy: turn toward the nearest live mine, then drive at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Homing;

impl Steering for Homing {
    fn steer(&mut self, senses: &Senses) -> Result<SteerAction, AgentError> {
        let Some((dx, dy)) = senses.nearest_mine else {
            return Ok(SteerAction::Forward);
        };
        if dx == 0 && dy == 0 {
            return Ok(SteerAction::Hold);
        }

        let wanted = if dx.unsigned_abs() >= dy.unsigned_abs() {
            if dx > 0 { Heading::East } else { Heading::West }
        } else if dy > 0 {
            Heading::South
        } else {
            Heading::North
        };

        if wanted == senses.heading {
            Ok(SteerAction::Forward)
        } else if wanted == senses.heading.turned_left() {
            Ok(SteerAction::TurnLeft)
        } else {
            Ok(SteerAction::TurnRight)
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted
// ---------------------------------------------------------------------------

/// Replays a fixed action list, cycling when it runs out.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    /// Actions to replay.
    actions: Vec<SteerAction>,
    /// Next action to emit.
    cursor: usize,
}

impl Scripted {
    /// Create a scripted strategy. An empty script always holds.
    pub const fn new(actions: Vec<SteerAction>) -> Self {
        Self { actions, cursor: 0 }
    }
}

impl Steering for Scripted {
    fn steer(&mut self, _senses: &Senses) -> Result<SteerAction, AgentError> {
        let Some(action) = self.actions.get(self.cursor).copied() else {
            return Ok(SteerAction::Hold);
        };
        self.cursor = self
            .cursor
            .saturating_add(1)
            .checked_rem(self.actions.len())
            .unwrap_or(0);
        Ok(action)
    }
}

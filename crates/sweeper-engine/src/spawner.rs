//! Population spawner for the headless engine.
//!
//! At startup the spawner builds one [`GridSweeper`] per population slot,
//! each on a random cell with a random heading and a [`Pilot`] chosen by
//! the `agents` section of `sweepers-config.yaml`. Every random choice is
//! derived from `world.seed`, so a config reproduces the same population.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use sweeper_agents::{AgentError, GridSweeper, Homing, RandomWalk, Senses, SteerAction, Steering};
use sweeper_core::arena::Arena;
use sweeper_core::config::SimulationConfig;
use sweeper_types::{GridPosition, Heading};
use sweeper_world::ArenaBounds;
use tracing::info;

use crate::error::EngineError;

/// Offset mixed into `world.seed` for start positions, so they do not
/// repeat the object layout drawn from the same seed.
const START_SEED_SALT: u64 = 0x5EED_5EED;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// How the spawner assigns steering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotMode {
    /// Every sweeper walks randomly.
    #[default]
    RandomWalk,
    /// Every sweeper heads for the nearest mine.
    Homing,
    /// The first `homing_share` of the population homes, the rest walk.
    Mixed,
}

/// Configuration for the spawner, loaded from the `agents` section of
/// `sweepers-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnerConfig {
    /// Strategy assignment.
    #[serde(default)]
    pub mode: PilotMode,

    /// Probability that a random walker steps forward on a tick.
    #[serde(default = "default_forward_bias")]
    pub forward_bias: f64,

    /// Fraction of the population that homes in `mixed` mode.
    #[serde(default = "default_homing_share")]
    pub homing_share: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            mode: PilotMode::default(),
            forward_bias: default_forward_bias(),
            homing_share: default_homing_share(),
        }
    }
}

impl SpawnerConfig {
    /// Reject probabilities outside `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawner`] naming the offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("forward_bias", self.forward_bias),
            ("homing_share", self.homing_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Spawner {
                    message: format!("agents.{field} {value} must lie in 0.0..=1.0"),
                });
            }
        }
        Ok(())
    }

    /// Number of homing sweepers in a population of `population`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn homing_count(&self, population: usize) -> usize {
        match self.mode {
            PilotMode::RandomWalk => 0,
            PilotMode::Homing => population,
            // homing_share is validated to 0..=1, so the product fits.
            PilotMode::Mixed => (population as f64 * self.homing_share).round() as usize,
        }
    }
}

const fn default_forward_bias() -> f64 {
    0.7
}

const fn default_homing_share() -> f64 {
    0.5
}

// -----------------------------------------------------------------------
// Pilot
// -----------------------------------------------------------------------

/// Steering strategy chosen per sweeper at spawn time.
#[derive(Debug, Clone)]
pub enum Pilot {
    /// Seeded random walk.
    Wander(RandomWalk),
    /// Greedy approach to the nearest mine.
    Home(Homing),
}

impl Steering for Pilot {
    fn steer(&mut self, senses: &Senses) -> Result<SteerAction, AgentError> {
        match self {
            Self::Wander(walk) => walk.steer(senses),
            Self::Home(homing) => homing.steer(senses),
        }
    }
}

// -----------------------------------------------------------------------
// Spawning
// -----------------------------------------------------------------------

/// Build the arena with a freshly spawned population.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the spawner config is invalid, or
/// [`EngineError::Arena`] if the arena cannot be built.
pub fn spawn_population(
    config: &SimulationConfig,
    spawner: &SpawnerConfig,
) -> Result<Arena<GridSweeper<Pilot>>, EngineError> {
    spawner.validate()?;

    let seed = config.world.seed;
    let population = usize::try_from(config.population.sweepers).unwrap_or(usize::MAX);
    let homing = spawner.homing_count(population);
    let mut rng = StdRng::seed_from_u64(seed ^ START_SEED_SALT);

    let arena = Arena::from_config(config, |index, bounds| {
        let pilot = if index < homing {
            Pilot::Home(Homing)
        } else {
            let walker_seed = seed.wrapping_add(u64::try_from(index).unwrap_or(u64::MAX));
            RandomWalk::with_bias(walker_seed, spawner.forward_bias)
                .map_or_else(|_err| Pilot::Wander(RandomWalk::new(walker_seed)), Pilot::Wander)
        };
        spawn_single_sweeper(bounds, &mut rng, pilot)
    })?;

    info!(
        sweepers = arena.population(),
        homing,
        mode = ?spawner.mode,
        forward_bias = spawner.forward_bias,
        "Population spawned"
    );
    Ok(arena)
}

/// One sweeper on a random cell with a random heading.
pub fn spawn_single_sweeper(
    bounds: &ArenaBounds,
    rng: &mut impl Rng,
    pilot: Pilot,
) -> GridSweeper<Pilot> {
    let start = bounds.random_cell(rng).unwrap_or(GridPosition::new(0, 0));
    let heading = match rng.random_range(0..4_u8) {
        0 => Heading::North,
        1 => Heading::East,
        2 => Heading::South,
        _ => Heading::West,
    };
    GridSweeper::new(*bounds, start, heading, pilot)
}

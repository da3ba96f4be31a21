//! Arena state: the sweeper population, the world objects and the bounds.
//!
//! The arena is the only owner of entities. The scheduler borrows it
//! mutably once per step; renderers and tests read it through slices.

use sweeper_agents::Sweeper;
use sweeper_world::{ArenaBounds, WorldError, WorldObject, place_seeded};
use tracing::info;

use crate::config::{ConfigError, SimulationConfig};

/// Errors that can occur while building the arena.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Bounds or object placement failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The configuration failed validation.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// No sweepers were supplied.
    #[error("arena needs at least one sweeper")]
    EmptyPopulation,

    /// More elite sweepers requested than exist.
    #[error("elite count {elite} exceeds population {population}")]
    EliteExceedsPopulation {
        /// Requested elite count.
        elite: usize,
        /// Population size.
        population: usize,
    },
}

/// Population, objects and bounds for one run.
#[derive(Debug, Clone)]
pub struct Arena<A> {
    bounds: ArenaBounds,
    sweepers: Vec<A>,
    objects: Vec<WorldObject>,
    elite_count: usize,
}

impl<A: Sweeper> Arena<A> {
    /// Assemble an arena from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::EmptyPopulation`] if `sweepers` is empty.
    pub fn new(
        bounds: ArenaBounds,
        sweepers: Vec<A>,
        objects: Vec<WorldObject>,
    ) -> Result<Self, ArenaError> {
        if sweepers.is_empty() {
            return Err(ArenaError::EmptyPopulation);
        }
        Ok(Self {
            bounds,
            sweepers,
            objects,
            elite_count: 0,
        })
    }

    /// Build the arena described by `config`.
    ///
    /// Objects are placed from `world.seed` (mines, then super-mines, then
    /// rocks). `spawn` is called once per population slot with the slot
    /// index and the validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if the configuration is invalid, or
    /// [`ArenaError::World`] if placement fails.
    pub fn from_config<F>(config: &SimulationConfig, mut spawn: F) -> Result<Self, ArenaError>
    where
        F: FnMut(usize, &ArenaBounds) -> A,
    {
        config.validate()?;
        let bounds = config.arena_bounds()?;
        let objects = place_seeded(&bounds, config.object_counts(), config.world.seed)?;

        let population = usize::try_from(config.population.sweepers)
            .map_err(|_err| ArenaError::EmptyPopulation)?;
        let sweepers: Vec<A> = (0..population).map(|index| spawn(index, &bounds)).collect();

        let elite = usize::try_from(config.population.elite).unwrap_or(usize::MAX);
        let arena = Self::new(bounds, sweepers, objects)?.with_elite(elite)?;

        info!(
            width = bounds.width(),
            height = bounds.height(),
            cell = bounds.cell_size(),
            sweepers = arena.population(),
            objects = arena.objects.len(),
            "Arena built"
        );
        Ok(arena)
    }

    /// Flag the first `elite` sweepers as elite in snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::EliteExceedsPopulation`] if `elite` is larger
    /// than the population.
    pub fn with_elite(mut self, elite: usize) -> Result<Self, ArenaError> {
        if elite > self.sweepers.len() {
            return Err(ArenaError::EliteExceedsPopulation {
                elite,
                population: self.sweepers.len(),
            });
        }
        self.elite_count = elite;
        Ok(self)
    }

    /// Arena dimensions.
    pub const fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    /// All sweepers in population order.
    pub fn sweepers(&self) -> &[A] {
        &self.sweepers
    }

    /// Mutable access to the population, for a learner between generations.
    pub fn sweepers_mut(&mut self) -> &mut [A] {
        &mut self.sweepers
    }

    /// All world objects in placement order.
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Number of sweepers.
    pub fn population(&self) -> usize {
        self.sweepers.len()
    }

    /// Number of leading sweepers flagged elite.
    pub const fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Whether the sweeper at `index` falls within the elite count.
    pub const fn is_elite(&self, index: usize) -> bool {
        index < self.elite_count
    }

    /// Sweepers currently dead.
    pub fn dead_count(&self) -> usize {
        self.sweepers.iter().filter(|s| !s.is_alive()).count()
    }

    /// Look up one world object.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ObjectNotFound`] if `index` is out of range.
    pub fn object(&self, index: usize) -> Result<&WorldObject, WorldError> {
        self.objects
            .get(index)
            .ok_or(WorldError::ObjectNotFound(index))
    }

    /// Split borrow used by the scheduler to resolve one sweeper against
    /// the objects.
    pub fn parts_mut(&mut self) -> (&mut [A], &mut [WorldObject]) {
        (&mut self.sweepers, &mut self.objects)
    }

    /// Reset every sweeper, then every object.
    pub fn reset_all(&mut self) {
        for sweeper in &mut self.sweepers {
            sweeper.reset();
        }
        for object in &mut self.objects {
            object.reset();
        }
    }
}

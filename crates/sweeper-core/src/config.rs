//! Configuration loading and typed config structures for the Sweepers simulation.
//!
//! The canonical configuration lives in `sweepers-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, provides a loader, and checks the startup preconditions the
//! generation controller relies on (grid-aligned arena, non-empty
//! population, non-zero tick budget).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sweeper_world::{ArenaBounds, ObjectCounts, WorldError};

/// Environment variable overriding `logging.generation_log_path`.
pub const LOG_PATH_ENV: &str = "SWEEPERS_LOG_PATH";

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The arena dimensions violate the grid precondition.
    #[error("invalid arena: {source}")]
    Arena {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A value is outside its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `sweepers-config.yaml`. Every field has a
/// default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run-level settings (name, seed, run length, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Arena dimensions and grid cell size.
    #[serde(default)]
    pub arena: ArenaConfig,

    /// Population parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// World object counts.
    #[serde(default)]
    pub objects: ObjectsConfig,

    /// Generation timing and detection.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SWEEPERS_LOG_PATH` overrides `logging.generation_log_path` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Check every startup precondition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arena`] if the arena is not grid aligned, or
    /// [`ConfigError::Invalid`] for any other out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena_bounds()?;

        if self.population.sweepers == 0 {
            return Err(ConfigError::Invalid {
                reason: "population.sweepers must be at least 1".to_owned(),
            });
        }
        if self.population.elite > self.population.sweepers {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "population.elite ({}) exceeds population.sweepers ({})",
                    self.population.elite, self.population.sweepers
                ),
            });
        }
        if self.generation.ticks_per_generation == 0 {
            return Err(ConfigError::Invalid {
                reason: "generation.ticks_per_generation must be at least 1".to_owned(),
            });
        }
        let scale = self.generation.detection_scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("generation.detection_scale {scale} must be finite and >= 0"),
            });
        }
        Ok(())
    }

    /// Validated arena bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arena`] if the arena violates the grid
    /// precondition.
    pub fn arena_bounds(&self) -> Result<ArenaBounds, ConfigError> {
        Ok(ArenaBounds::new(
            self.arena.width,
            self.arena.height,
            self.arena.cell_size,
        )?)
    }

    /// Object counts for placement.
    pub const fn object_counts(&self) -> ObjectCounts {
        ObjectCounts {
            mines: self.objects.mines,
            super_mines: self.objects.super_mines,
            rocks: self.objects.rocks,
        }
    }
}

/// Run-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable run name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for object placement and reference steering.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Generations to run before stopping (0 = until stopped externally).
    #[serde(default = "default_max_generations")]
    pub max_generations: u64,

    /// Real-time milliseconds to wait between steps (0 = full speed).
    #[serde(default)]
    pub step_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            max_generations: default_max_generations(),
            step_interval_ms: 0,
        }
    }
}

/// Arena dimensions.
///
/// `width` and `height` must each be an exact multiple of `cell_size`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArenaConfig {
    /// Arena width in arena units.
    #[serde(default = "default_arena_extent")]
    pub width: u32,

    /// Arena height in arena units.
    #[serde(default = "default_arena_extent")]
    pub height: u32,

    /// Side of one grid cell in arena units.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_extent(),
            height: default_arena_extent(),
            cell_size: default_cell_size(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of sweepers.
    #[serde(default = "default_sweepers")]
    pub sweepers: u32,

    /// Leading sweepers flagged elite for renderers and learners.
    #[serde(default = "default_elite")]
    pub elite: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            sweepers: default_sweepers(),
            elite: default_elite(),
        }
    }
}

/// World object counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectsConfig {
    /// Number of mines.
    #[serde(default = "default_mines")]
    pub mines: u32,

    /// Number of super-mines.
    #[serde(default = "default_super_mines")]
    pub super_mines: u32,

    /// Number of rocks.
    #[serde(default = "default_rocks")]
    pub rocks: u32,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            mines: default_mines(),
            super_mines: default_super_mines(),
            rocks: default_rocks(),
        }
    }
}

/// Generation timing and detection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// Ticks each generation runs before aggregation and reset.
    #[serde(default = "default_ticks_per_generation")]
    pub ticks_per_generation: u32,

    /// Detection radius in arena units.
    #[serde(default = "default_detection_scale")]
    pub detection_scale: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            ticks_per_generation: default_ticks_per_generation(),
            detection_scale: default_detection_scale(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File receiving one CSV line per completed generation.
    #[serde(default = "default_generation_log_path")]
    pub generation_log_path: PathBuf,

    /// Generation index after which the generation log is closed for good.
    #[serde(default = "default_generation_log_cutoff")]
    pub generation_log_cutoff: u64,
}

impl LoggingConfig {
    /// Override the generation log path from the environment when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LOG_PATH_ENV) {
            self.generation_log_path = PathBuf::from(val);
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            generation_log_path: default_generation_log_path(),
            generation_log_cutoff: default_generation_log_cutoff(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Minefield".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_generations() -> u64 {
    150
}

const fn default_arena_extent() -> u32 {
    400
}

const fn default_cell_size() -> u32 {
    10
}

const fn default_sweepers() -> u32 {
    30
}

const fn default_elite() -> u32 {
    4
}

const fn default_mines() -> u32 {
    40
}

const fn default_super_mines() -> u32 {
    5
}

const fn default_rocks() -> u32 {
    10
}

const fn default_ticks_per_generation() -> u32 {
    2000
}

const fn default_detection_scale() -> f64 {
    5.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_generation_log_path() -> PathBuf {
    PathBuf::from("generations.csv")
}

const fn default_generation_log_cutoff() -> u64 {
    100
}

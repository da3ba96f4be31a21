//! Headless engine binary for the Sweepers simulation.
//!
//! This is the main entry point that wires together configuration, the
//! population spawner, the generation scheduler and the generation log.
//! It runs generations until the configured limit and then shuts down.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `sweepers-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Load the spawner configuration from the `agents` section
//! 4. Build the arena and spawn the population
//! 5. Create the simulation clock
//! 6. Open the generation log
//! 7. Create operator state from the run limits
//! 8. Run generations
//! 9. Close the generation log and log the result

mod error;
mod progress;
mod spawner;

use std::path::Path;

use sweeper_core::clock::SimulationClock;
use sweeper_core::config::SimulationConfig;
use sweeper_core::log_sink::GenerationLog;
use sweeper_core::operator::OperatorState;
use sweeper_core::runner;
use sweeper_core::scheduler::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::ProgressCallback;
use crate::spawner::SpawnerConfig;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "sweepers-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the run itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("sweeper-engine starting");
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        sweepers = config.population.sweepers,
        ticks_per_generation = config.generation.ticks_per_generation,
        max_generations = config.world.max_generations,
        "Configuration loaded"
    );

    // 3. Load spawner configuration.
    let spawner_config = load_spawner_config()?;

    // 4. Build the arena and spawn the population.
    let arena = spawner::spawn_population(&config, &spawner_config)?;

    // 5. Create the simulation clock.
    let clock = SimulationClock::new(config.generation.ticks_per_generation)?;

    // 6. Open the generation log.
    let log = GenerationLog::create(
        &config.logging.generation_log_path,
        config.logging.generation_log_cutoff,
    )?;

    let mut sim = Simulation::new(arena, clock, log, config.generation.detection_scale);

    // 7. Create operator state.
    let operator = OperatorState::from_config(&config.world);
    info!(
        max_generations = operator.max_generations(),
        step_interval_ms = operator.step_interval_ms(),
        "Operator state initialized"
    );

    // 8. Run generations.
    let mut callback = ProgressCallback::new();
    let result = runner::run_generations(&mut sim, &operator, &mut callback);

    // 9. Close the log whatever the outcome, then report.
    sim.close_log().map_err(EngineError::from)?;
    let summary = result.map_err(EngineError::from)?;
    runner::log_run_end(&summary);

    info!(
        run_id = %summary.run_id,
        end_reason = ?summary.end_reason,
        ticks = callback.ticks(),
        best_generation = ?callback.best().map(|best| best.generation),
        best_max_fitness = ?callback.best().map(|best| best.max_fitness),
        "sweeper-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `sweepers-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        SimulationConfig::from_file(config_path)?
    } else {
        let mut defaults = SimulationConfig::default();
        defaults.logging.apply_env_overrides();
        defaults
    };
    config.validate()?;
    Ok(config)
}

/// Load spawner configuration from `sweepers-config.yaml`.
///
/// Reads the `agents` section from the YAML config file. If the file
/// does not exist or lacks the `agents` key, defaults are used.
fn load_spawner_config() -> Result<SpawnerConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if !config_path.exists() {
        info!("Config file not found, using default spawner settings");
        return Ok(SpawnerConfig::default());
    }

    let contents = std::fs::read_to_string(config_path).map_err(|e| EngineError::Spawner {
        message: format!("failed to read config file: {e}"),
    })?;

    // Parse the full YAML and extract just the "agents" section.
    let raw: serde_yml::Value = serde_yml::from_str(&contents).map_err(|e| EngineError::Spawner {
        message: format!("failed to parse config YAML: {e}"),
    })?;

    raw.get("agents").map_or_else(
        || Ok(SpawnerConfig::default()),
        |agents_value| {
            serde_yml::from_value(agents_value.clone()).map_err(|e| EngineError::Spawner {
                message: format!("failed to parse agents config: {e}"),
            })
        },
    )
}

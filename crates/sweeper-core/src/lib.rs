//! Generation scheduler, interaction resolver, and statistics for the
//! Sweepers simulation.
//!
//! This crate owns the step-driven state machine that drives a run: each
//! step either runs one tick (every live sweeper updates, detects, and
//! suffers the consequence of what it touched) or closes the generation
//! (aggregate fitness, append to history and the generation log, reset).
//!
//! # Modules
//!
//! - [`arena`] -- Population, world objects and bounds.
//! - [`clock`] -- Tick and generation counters.
//! - [`config`] -- Configuration loading from `sweepers-config.yaml` into
//!   strongly-typed structs.
//! - [`interaction`] -- Per-sweeper detection and kind-specific consequences.
//! - [`log_sink`] -- Bounded CSV generation log.
//! - [`operator`] -- Stop flag, pacing and generation limit for a run.
//! - [`runner`] -- The run loop around [`Simulation::step`].
//! - [`scheduler`] -- [`Simulation`] and the tick/boundary state machine.
//! - [`snapshot`] -- Read-only state for external renderers.
//! - [`stats`] -- Fitness aggregation and history.
//!
//! [`Simulation`]: scheduler::Simulation
//! [`Simulation::step`]: scheduler::Simulation::step

pub mod arena;
pub mod clock;
pub mod config;
pub mod interaction;
pub mod log_sink;
pub mod operator;
pub mod runner;
pub mod scheduler;
pub mod snapshot;
pub mod stats;

//! Scenario tests for the generation controller.
//!
//! Each test builds a tiny arena by hand, drives [`Simulation::step`]
//! directly, and checks the observable results: sweeper and object state,
//! the fitness history, and the bytes written to the generation log.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use sweeper_agents::{AgentError, GridSweeper, RandomWalk, Scripted, SteerAction, Sweeper};
use sweeper_core::arena::Arena;
use sweeper_core::clock::SimulationClock;
use sweeper_core::config::SimulationConfig;
use sweeper_core::log_sink::GenerationLog;
use sweeper_core::scheduler::{Simulation, StepError, StepOutcome};
use sweeper_types::{GridPosition, Heading, ObjectKind};
use sweeper_world::{ArenaBounds, WorldObject};

/// Test double: stays put, reports a fixed candidate, counts updates, and
/// can be told to fail on a given update.
#[derive(Debug, Clone)]
struct Stub {
    candidate: Option<usize>,
    alive: bool,
    fitness: u32,
    updates: u32,
    fail_on_update: Option<u32>,
}

impl Stub {
    fn targeting(candidate: usize) -> Self {
        Self {
            candidate: Some(candidate),
            ..Self::idle()
        }
    }

    fn idle() -> Self {
        Self {
            candidate: None,
            alive: true,
            fitness: 0,
            updates: 0,
            fail_on_update: None,
        }
    }

    fn failing_on(update: u32) -> Self {
        Self {
            fail_on_update: Some(update),
            ..Self::idle()
        }
    }
}

impl Sweeper for Stub {
    fn update(&mut self, _objects: &[WorldObject]) -> Result<(), AgentError> {
        self.updates = self.updates.saturating_add(1);
        if self.fail_on_update == Some(self.updates) {
            return Err(AgentError::UpdateFailed {
                reason: "forced failure".to_owned(),
            });
        }
        Ok(())
    }

    fn detect(&self, _objects: &[WorldObject], _scale: f64) -> Option<usize> {
        self.candidate
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn die(&mut self) {
        self.alive = false;
    }

    fn reset(&mut self) {
        self.alive = true;
    }

    fn fitness(&self) -> u32 {
        self.fitness
    }

    fn increment_fitness(&mut self) {
        self.fitness = self.fitness.saturating_add(1);
    }

    fn position(&self) -> GridPosition {
        GridPosition::new(0, 0)
    }

    fn heading(&self) -> Heading {
        Heading::North
    }
}

/// Log writer whose bytes outlive the sink that drops it at the cutoff.
#[derive(Clone, Default)]
struct SharedLog(Rc<RefCell<Vec<u8>>>);

impl SharedLog {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }

    fn held_by_sink(&self) -> bool {
        Rc::strong_count(&self.0) > 1
    }
}

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn bounds() -> ArenaBounds {
    ArenaBounds::new(100, 100, 10).unwrap()
}

fn object(kind: ObjectKind, x: i32, y: i32) -> WorldObject {
    WorldObject::new(kind, GridPosition::new(x, y))
}

fn simulation<A: Sweeper>(
    sweepers: Vec<A>,
    objects: Vec<WorldObject>,
    budget: u32,
    cutoff: u64,
) -> Simulation<A, Vec<u8>> {
    let arena = Arena::new(bounds(), sweepers, objects).unwrap();
    Simulation::new(
        arena,
        SimulationClock::new(budget).unwrap(),
        GenerationLog::new(Vec::new(), cutoff),
        5.0,
    )
}

fn shared_simulation<A: Sweeper>(sweepers: Vec<A>, cutoff: u64) -> (Simulation<A, SharedLog>, SharedLog) {
    let log = SharedLog::default();
    let arena = Arena::new(bounds(), sweepers, Vec::new()).unwrap();
    let sim = Simulation::new(
        arena,
        SimulationClock::new(1).unwrap(),
        GenerationLog::new(log.clone(), cutoff),
        5.0,
    );
    (sim, log)
}

fn run_generations<A: Sweeper, W: Write>(sim: &mut Simulation<A, W>, generations: u64) {
    let target = sim.clock().generation().saturating_add(generations);
    while sim.clock().generation() < target {
        sim.step().unwrap();
    }
}

fn log_text<A: Sweeper>(sim: &mut Simulation<A, Vec<u8>>) -> String {
    let bytes = sim.close_log().unwrap().unwrap_or_default();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn single_sweeper_gathers_reachable_mine() {
    let sweeper = GridSweeper::new(
        bounds(),
        GridPosition::new(0, 0),
        Heading::East,
        Scripted::new(vec![SteerAction::Forward]),
    );
    let mut sim = simulation(vec![sweeper], vec![object(ObjectKind::Mine, 10, 0)], 1, 100);

    assert!(matches!(sim.step().unwrap(), StepOutcome::Tick(_)));
    assert_eq!(sim.arena().sweepers().first().unwrap().fitness(), 1);
    assert!(!sim.arena().objects().first().unwrap().is_alive());

    let StepOutcome::GenerationCompleted(record) = sim.step().unwrap() else {
        panic!("second step should close the generation");
    };

    assert_eq!(record.generation, 0);
    assert_eq!(record.max_fitness, 1);

    // Boundary: everything is back in play, fitness carries over.
    let sweeper = sim.arena().sweepers().first().unwrap();
    assert!(sweeper.is_alive());
    assert_eq!(sweeper.fitness(), 1);
    assert!(sim.arena().objects().first().unwrap().is_alive());
    assert_eq!(sim.clock().generation(), 1);
    assert_eq!(sim.clock().tick(), 0);

    assert_eq!(log_text(&mut sim), "0,1.0,1,0\n");
}

#[test]
fn rock_collision_counts_one_death() {
    let mut sim = simulation(
        vec![Stub::targeting(0), Stub::idle()],
        vec![object(ObjectKind::Rock, 20, 20)],
        1,
        100,
    );

    run_generations(&mut sim, 1);

    let record = *sim.history().latest().unwrap();
    assert_eq!(record.deaths, 1);
    assert_eq!(record.max_fitness, 0);
    assert!(record.mean_fitness.abs() < f64::EPSILON);
    assert_eq!(log_text(&mut sim), "0,0.0,0,1\n");
}

#[test]
fn deaths_are_read_before_reset() {
    let mut sim = simulation(
        vec![Stub::targeting(0), Stub::targeting(1), Stub::idle()],
        vec![
            object(ObjectKind::Rock, 10, 10),
            object(ObjectKind::SuperMine, 20, 20),
        ],
        2,
        100,
    );

    sim.step().unwrap();
    assert_eq!(sim.arena().dead_count(), 2);
    sim.step().unwrap();

    let StepOutcome::GenerationCompleted(record) = sim.step().unwrap() else {
        panic!("third step should close the generation");
    };
    assert_eq!(record.deaths, 2);
    assert_eq!(sim.arena().dead_count(), 0);
    assert!(sim.arena().objects().iter().all(WorldObject::is_alive));
}

#[test]
fn dead_sweepers_are_skipped_for_the_generation() {
    let mut sim = simulation(
        vec![Stub::targeting(0)],
        vec![object(ObjectKind::Rock, 10, 10)],
        4,
        100,
    );

    sim.step().unwrap();
    let after_death = sim.arena().sweepers().first().unwrap().clone();
    assert!(!after_death.alive);

    for _ in 0..3 {
        let StepOutcome::Tick(summary) = sim.step().unwrap() else {
            panic!("budget not yet spent");
        };
        assert_eq!(summary.processed, 0);
    }

    let stub = sim.arena().sweepers().first().unwrap();
    assert_eq!(stub.updates, after_death.updates);
    assert_eq!(stub.fitness, after_death.fitness);
}

#[test]
fn mine_is_claimed_once_per_generation() {
    let mut sim = simulation(
        vec![Stub::targeting(0), Stub::targeting(0)],
        vec![object(ObjectKind::Mine, 30, 30)],
        1,
        100,
    );

    let StepOutcome::Tick(summary) = sim.step().unwrap() else {
        panic!("expected a tick");
    };
    assert_eq!(summary.gathered, 1);
    assert_eq!(summary.processed, 2);

    let fitness: Vec<u32> = sim.arena().sweepers().iter().map(Sweeper::fitness).collect();
    assert_eq!(fitness, vec![1, 0]);
    assert!(!sim.arena().objects().first().unwrap().is_alive());
}

#[test]
fn super_mine_destroys_both() {
    let mut sim = simulation(
        vec![Stub::targeting(0)],
        vec![object(ObjectKind::SuperMine, 40, 40)],
        1,
        100,
    );

    sim.step().unwrap();
    let stub = sim.arena().sweepers().first().unwrap();
    assert!(!stub.alive);
    assert_eq!(stub.fitness, 0);
    assert!(!sim.arena().objects().first().unwrap().is_alive());
}

#[test]
fn rock_survives_the_collision() {
    let mut sim = simulation(
        vec![Stub::targeting(0)],
        vec![object(ObjectKind::Rock, 40, 40)],
        1,
        100,
    );

    sim.step().unwrap();
    let stub = sim.arena().sweepers().first().unwrap();
    assert!(!stub.alive);
    assert_eq!(stub.fitness, 0);
    assert!(sim.arena().objects().first().unwrap().is_alive());
}

#[test]
fn reset_keeps_fitness_and_is_idempotent() {
    let mut sim = simulation(
        vec![Stub::targeting(0)],
        vec![object(ObjectKind::Mine, 10, 0)],
        1,
        100,
    );
    run_generations(&mut sim, 1);

    let arena = sim.arena_mut();
    arena.reset_all();
    arena.reset_all();

    let stub = arena.sweepers().first().unwrap();
    assert!(stub.alive);
    assert_eq!(stub.fitness, 1);
    assert!(arena.objects().first().unwrap().is_alive());
}

#[test]
fn history_tracks_accumulating_fitness() {
    let mut sim = simulation(
        vec![Stub::targeting(0), Stub::idle()],
        vec![object(ObjectKind::Mine, 50, 50)],
        3,
        100,
    );

    run_generations(&mut sim, 3);

    let history = sim.history();
    assert_eq!(history.len(), 3);
    let generations: Vec<u64> = history.records().iter().map(|r| r.generation).collect();
    assert_eq!(generations, vec![0, 1, 2]);
    // Fitness is never cleared by reset, so the mean climbs each generation.
    assert_eq!(history.mean_series(), vec![0.5, 1.0, 1.5]);
    assert_eq!(history.best_series(), vec![1, 2, 3]);
    assert_eq!(history.best_generation().unwrap().generation, 2);
    assert_eq!(log_text(&mut sim), "0,0.5,1,0\n1,1.0,2,0\n2,1.5,3,0\n");
}

#[test]
fn logging_stops_after_cutoff() {
    let (mut sim, log) = shared_simulation(vec![Stub::idle()], 2);

    run_generations(&mut sim, 2);
    assert!(sim.log().is_active());
    assert!(log.held_by_sink());

    run_generations(&mut sim, 3);
    assert_eq!(sim.history().len(), 5);
    assert!(!sim.log().is_active());
    assert_eq!(sim.log().lines_written(), 3);

    // The sink let go of its writer at the cutoff.
    assert!(!log.held_by_sink());
    assert!(sim.close_log().unwrap().is_none());
    assert_eq!(log.text(), "0,0.0,0,0\n1,0.0,0,0\n2,0.0,0,0\n");
}

#[test]
fn cutoff_log_file_holds_three_lines() {
    let path = std::env::temp_dir().join(format!("sweepers-cutoff-{}.csv", std::process::id()));
    let arena = Arena::new(bounds(), vec![Stub::idle()], Vec::new()).unwrap();
    let mut sim = Simulation::new(
        arena,
        SimulationClock::new(1).unwrap(),
        GenerationLog::create(&path, 2).unwrap(),
        5.0,
    );

    run_generations(&mut sim, 6);

    // Already flushed and closed at generation 2, before the run ends.
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "0,0.0,0,0\n1,0.0,0,0\n2,0.0,0,0\n");
    assert!(sim.close_log().unwrap().is_none());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn failed_update_halts_the_scheduler() {
    let mut sim = simulation(
        vec![Stub::targeting(0), Stub::failing_on(1), Stub::targeting(0)],
        vec![object(ObjectKind::Mine, 10, 10)],
        5,
        100,
    );

    let err = sim.step().unwrap_err();
    assert!(matches!(err, StepError::AgentUpdate { index: 1, .. }));
    assert!(sim.is_halted());

    // The first sweeper's gather stands; the third never ran.
    let fitness: Vec<u32> = sim.arena().sweepers().iter().map(Sweeper::fitness).collect();
    assert_eq!(fitness, vec![1, 0, 0]);
    assert_eq!(sim.arena().sweepers().get(2).unwrap().updates, 0);

    assert!(matches!(sim.step(), Err(StepError::Halted)));
    assert!(sim.history().is_empty());
}

#[test]
fn configured_run_is_reproducible() {
    let mut config = SimulationConfig::default();
    config.arena.width = 200;
    config.arena.height = 200;
    config.population.sweepers = 6;
    config.population.elite = 2;
    config.generation.ticks_per_generation = 50;

    let build = |config: &SimulationConfig| {
        let arena = Arena::from_config(config, |index, bounds| {
            let start = bounds.cell_origin(0, u32::try_from(index).unwrap()).unwrap();
            GridSweeper::new(*bounds, start, Heading::East, RandomWalk::new(u64::try_from(index).unwrap()))
        })
        .unwrap();
        Simulation::new(
            arena,
            SimulationClock::new(config.generation.ticks_per_generation).unwrap(),
            GenerationLog::new(Vec::new(), config.logging.generation_log_cutoff),
            config.generation.detection_scale,
        )
    };

    let mut first = build(&config);
    let mut second = build(&config);
    run_generations(&mut first, 4);
    run_generations(&mut second, 4);

    assert_eq!(first.history(), second.history());
    for record in first.history().records() {
        assert!(record.deaths <= 6);
        assert!(record.max_fitness >= 0);
    }
    assert_eq!(log_text(&mut first), log_text(&mut second));
}

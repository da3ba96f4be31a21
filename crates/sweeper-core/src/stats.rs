//! End-of-generation fitness statistics.

use sweeper_agents::Sweeper;
use sweeper_types::GenerationRecord;

/// Aggregate the population into the record for `generation`.
///
/// Must run before the arena is reset: deaths are read from the alive
/// flags as they stand. An empty population yields mean `0.0`, max `-1`.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate<A: Sweeper>(generation: u64, sweepers: &[A]) -> GenerationRecord {
    let mut total: u64 = 0;
    let mut best = GenerationRecord::NO_SWEEPERS;
    let mut deaths: u32 = 0;

    for sweeper in sweepers {
        let fitness = sweeper.fitness();
        total = total.saturating_add(u64::from(fitness));
        best = best.max(i64::from(fitness));
        if !sweeper.is_alive() {
            deaths = deaths.saturating_add(1);
        }
    }

    let mean_fitness = if sweepers.is_empty() {
        0.0
    } else {
        total as f64 / sweepers.len() as f64
    };

    GenerationRecord {
        generation,
        mean_fitness,
        max_fitness: best,
        deaths,
    }
}

/// Every completed generation's record, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessHistory {
    records: Vec<GenerationRecord>,
}

impl FitnessHistory {
    /// Empty history.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append the next record.
    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// Number of completed generations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no generation has completed yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    /// Mean fitness per generation, for plotting.
    pub fn mean_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_fitness).collect()
    }

    /// Best fitness per generation, for plotting.
    pub fn best_series(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.max_fitness).collect()
    }

    /// Deaths per generation, for plotting.
    pub fn death_series(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.deaths).collect()
    }

    /// Record with the highest max fitness. Earliest wins ties.
    pub fn best_generation(&self) -> Option<&GenerationRecord> {
        self.records
            .iter()
            .reduce(|best, r| if r.max_fitness > best.max_fitness { r } else { best })
    }
}

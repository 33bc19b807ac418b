use crate::core::{Fitness, Position};

/// Snapshot of the swarm-level best estimate after one iteration.
#[derive(Clone, Debug)]
pub struct IterationRecord {
    pub iteration: usize,
    pub position: Position,
    pub fitness: Fitness,
}

/// Observer invoked after every completed iteration with the swarm's best
/// estimate so far. The engine never stops early; observers only watch.
pub trait SwarmCallback {
    fn on_iteration(&mut self, iteration: usize, best: &Position, fitness: Fitness);
}

/// Observer that does nothing.
pub struct NullCallback;

impl SwarmCallback for NullCallback {
    fn on_iteration(&mut self, _iteration: usize, _best: &Position, _fitness: Fitness) {}
}

/// Records the best estimate after every iteration, optionally printing a
/// progress line per iteration.
pub struct HistoryCallback {
    verbose: bool,
    history: Vec<IterationRecord>,
}

impl HistoryCallback {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            history: Vec::new(),
        }
    }

    /// Get iteration history
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }
}

impl SwarmCallback for HistoryCallback {
    fn on_iteration(&mut self, iteration: usize, best: &Position, fitness: Fitness) {
        self.history.push(IterationRecord {
            iteration,
            position: best.to_vec(),
            fitness,
        });

        if self.verbose {
            println!("Iter {:4}: Fitness = {:.6e}", iteration, fitness);
        }
    }
}

use rayon::prelude::*;

use crate::core::{Fitness, Fitnesses, Position, Positions};

/// The objective-function contract: one batched call per iteration, taking
/// every particle's current position and returning one fitness per position
/// in the same order. Implementations must be pure with respect to engine
/// state; invalid inputs get the worst-possible sentinel, not a panic.
pub trait Objective {
    fn evaluate(&self, positions: &Positions) -> Fitnesses;
}

/// Wraps a per-position function, evaluated sequentially.
pub struct FnObjective<F>
where
    F: Fn(&Position) -> Fitness,
{
    function: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&Position) -> Fitness,
{
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&Position) -> Fitness,
{
    fn evaluate(&self, positions: &Positions) -> Fitnesses {
        positions.iter().map(|p| (self.function)(p)).collect()
    }
}

/// Wraps a per-position function, evaluated concurrently. Results come back
/// in input order, so observable semantics match `FnObjective`.
pub struct ParallelFnObjective<F>
where
    F: Fn(&Position) -> Fitness + Sync,
{
    function: F,
}

impl<F> ParallelFnObjective<F>
where
    F: Fn(&Position) -> Fitness + Sync,
{
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> Objective for ParallelFnObjective<F>
where
    F: Fn(&Position) -> Fitness + Sync,
{
    fn evaluate(&self, positions: &Positions) -> Fitnesses {
        positions.par_iter().map(|p| (self.function)(p)).collect()
    }
}

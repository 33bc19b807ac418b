use crate::core::{Weight, STANDARD_INERTIA_WEIGHT};

/// Supplies the inertia coefficient for a given iteration. Schedules read
/// the live iteration counter on every call; nothing is cached.
pub trait InertiaScaling {
    fn weight(&self, iteration: usize, num_iterations: usize) -> Weight;
}

/// Constant inertia weight.
pub struct FixedInertia {
    weight: Weight,
}

impl FixedInertia {
    pub fn new(weight: Weight) -> Self {
        Self { weight }
    }

    /// The standard constriction constant (0.72984).
    pub fn standard() -> Self {
        Self::new(STANDARD_INERTIA_WEIGHT)
    }
}

impl InertiaScaling for FixedInertia {
    fn weight(&self, _iteration: usize, _num_iterations: usize) -> Weight {
        self.weight
    }
}

/// Straight-line anneal: `start` at iteration 0, `end` at the final
/// iteration.
pub struct LinearInertia {
    start: Weight,
    end: Weight,
}

impl LinearInertia {
    pub fn new(start: Weight, end: Weight) -> Self {
        Self { start, end }
    }
}

impl InertiaScaling for LinearInertia {
    fn weight(&self, iteration: usize, num_iterations: usize) -> Weight {
        if num_iterations == 0 {
            return self.start;
        }
        let slope = (self.end - self.start) / num_iterations as f64;
        slope * iteration as f64 + self.start
    }
}

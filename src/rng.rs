use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform deviates. The engine draws from a single source in a
/// strictly defined order, so reproducibility only requires that the source
/// be deterministic for a given seed.
pub trait UniformSource {
    /// Draw one deviate uniformly distributed in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Restore the source to its initial state for `seed`.
    fn reseed(&mut self, seed: u64);
}

/// Default deviate source. ChaCha8 keeps the stream identical across rand
/// releases, which the determinism guarantees depend on.
pub struct SeededUniform {
    rng: ChaCha8Rng,
}

impl SeededUniform {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededUniform {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Replays a fixed script of deviates; `reseed` rewinds to the start.
#[cfg(test)]
pub(crate) struct ScriptedUniform {
    values: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedUniform {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

#[cfg(test)]
impl UniformSource for ScriptedUniform {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }

    fn reseed(&mut self, _seed: u64) {
        self.next = 0;
    }
}

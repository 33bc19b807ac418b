use thiserror::Error;

/// Errors the engine can report. The taxonomy is narrow: a numeric core with
/// no I/O either has a bad configuration, a broken objective contract, or a
/// bad particle lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwarmError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The objective returned a fitness batch whose length does not match
    /// the positions batch. Truncating or padding would silently corrupt
    /// particle bookkeeping, so this is fatal.
    #[error("objective returned {got} fitness values for {expected} positions")]
    FitnessCountMismatch { expected: usize, got: usize },

    #[error("particle id {id} out of range (population size {population})")]
    ParticleOutOfRange { id: usize, population: usize },
}

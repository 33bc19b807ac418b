// ===== SEARCH-SPACE TYPES =====

/// Ordered sequence of real-valued coordinates; length = search dimensionality.
pub type Vector = Vec<f64>;

/// A point in the normalized search space.
pub type Position = Vector;

/// Per-dimension displacement applied to a position each iteration.
pub type Velocity = Vector;

/// Inertia/cognitive/social coefficient.
pub type Weight = f64;

/// Scalar quality of a position; lower is better.
pub type Fitness = f64;

/// Stable per-swarm particle identity, doubling as the population index.
pub type ParticleId = usize;

/// One batch of particle positions, ordered by particle id.
pub type Positions = Vec<Position>;

/// One batch of fitness values, ordered to match a `Positions` batch.
pub type Fitnesses = Vec<Fitness>;

// ===== CONSTANTS =====

/// Sentinel for "worst possible / invalid" fitness.
pub const WORST_POSSIBLE_FITNESS: Fitness = f64::MAX;

/// Canonical per-dimension search range.
pub const SEARCH_LOWER_BOUND: f64 = -1.0;
pub const SEARCH_UPPER_BOUND: f64 = 1.0;

/// Standard constriction constants (Clerc-Kennedy).
pub const STANDARD_INERTIA_WEIGHT: Weight = 0.72984;
pub const STANDARD_COGNITIVE_WEIGHT: Weight = 1.496172;
pub const STANDARD_SOCIAL_WEIGHT: Weight = 1.496172;

/// True when every coordinate lies within the canonical search range.
pub fn within_search_bounds(position: &Position) -> bool {
    position
        .iter()
        .all(|&x| (SEARCH_LOWER_BOUND..=SEARCH_UPPER_BOUND).contains(&x))
}

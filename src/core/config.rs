use serde::{Deserialize, Serialize};

use super::error::SwarmError;
use super::types::{
    Weight, STANDARD_COGNITIVE_WEIGHT, STANDARD_INERTIA_WEIGHT, STANDARD_SOCIAL_WEIGHT,
};

/// Default per-dimension speed cap, retained while the constraint is disabled.
pub const DEFAULT_MAX_SPEED: f64 = 1.0;

/// Inertia-weight schedule selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InertiaMode {
    /// Constant weight for every iteration.
    Fixed { weight: Weight },
    /// Straight-line anneal from `start` at iteration 0 toward `end` at the
    /// final iteration.
    Linear { start: Weight, end: Weight },
}

/// Neighborhood shape for ring topologies. The default is a one-sided
/// successor window of width 2; the classic ring is `Symmetric` with
/// radius 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighborhood {
    /// `width` particles starting at the asker (inclusive), walking forward.
    Forward { width: usize },
    /// The asker plus `radius` particles on each side.
    Symmetric { radius: usize },
}

impl Default for Neighborhood {
    fn default() -> Self {
        Neighborhood::Forward { width: 2 }
    }
}

/// Full engine configuration. Defaults are the standard constriction
/// constants with a fixed inertia weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Seed for the uniform-deviate source; same seed + same configuration
    /// gives identical particle trajectories.
    pub seed: u64,
    /// Search-space dimensionality N (>= 1).
    pub dimensions: usize,
    /// Population size (>= 1).
    pub particles: usize,
    /// Iteration budget; the engine always runs it in full.
    pub iterations: usize,
    pub cognitive_weight: Weight,
    pub social_weight: Weight,
    pub inertia: InertiaMode,
    /// Per-dimension speed cap, applied only while `max_speed_enabled`.
    pub max_speed: f64,
    pub max_speed_enabled: bool,
    pub neighborhood: Neighborhood,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dimensions: 2,
            particles: 20,
            iterations: 1000,
            cognitive_weight: STANDARD_COGNITIVE_WEIGHT,
            social_weight: STANDARD_SOCIAL_WEIGHT,
            inertia: InertiaMode::Fixed {
                weight: STANDARD_INERTIA_WEIGHT,
            },
            max_speed: DEFAULT_MAX_SPEED,
            max_speed_enabled: false,
            neighborhood: Neighborhood::default(),
        }
    }
}

impl SwarmConfig {
    /// Standard PSO: fixed inertia with the standard constriction weights.
    pub fn standard(seed: u64, dimensions: usize, particles: usize, iterations: usize) -> Self {
        Self {
            seed,
            dimensions,
            particles,
            iterations,
            ..Self::default()
        }
    }

    /// Linear PSO: inertia annealed from `inertia_start` to `inertia_end`
    /// over the iteration budget, with explicit cognitive/social weights.
    pub fn linear(
        seed: u64,
        dimensions: usize,
        particles: usize,
        iterations: usize,
        inertia_start: Weight,
        inertia_end: Weight,
        cognitive_weight: Weight,
        social_weight: Weight,
    ) -> Self {
        Self {
            seed,
            dimensions,
            particles,
            iterations,
            cognitive_weight,
            social_weight,
            inertia: InertiaMode::Linear {
                start: inertia_start,
                end: inertia_end,
            },
            ..Self::default()
        }
    }

    /// Fail-fast validation; called by every manager constructor.
    pub fn validate(&self) -> Result<(), SwarmError> {
        if self.dimensions < 1 {
            return Err(SwarmError::InvalidConfig(
                "dimensions must be at least 1".into(),
            ));
        }
        if self.particles < 1 {
            return Err(SwarmError::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        if self.max_speed_enabled && !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(SwarmError::InvalidConfig(format!(
                "enabled max speed must be finite and positive, got {}",
                self.max_speed
            )));
        }
        match self.neighborhood {
            Neighborhood::Forward { width } if width < 1 => Err(SwarmError::InvalidConfig(
                "forward neighborhood width must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SwarmError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SwarmError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SwarmError> {
        serde_json::to_string_pretty(self).map_err(|e| SwarmError::InvalidConfig(e.to_string()))
    }
}

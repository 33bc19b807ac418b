use crate::core::{Neighborhood, ParticleId, Position};

use super::particle::Particle;

/// Determines, for each particle, which peers' personal bests are visible to
/// it. Topologies never own particles; they read swarm state passed per call.
pub trait Topology {
    /// Called once per manager iteration before any particle evolves.
    /// Strategies that cache a neighborhood-best structure recompute it here.
    fn update(&mut self, swarm: &[Particle]);

    /// Position of the neighbor (by the topology's neighbor relation) whose
    /// personal best has the lowest fitness.
    fn social_best<'a>(&self, asker: ParticleId, swarm: &'a [Particle]) -> &'a Position;
}

/// Circular population with a configurable offset window. The default
/// window is one-sided: the asker plus its successor. Neighbor ids wrap at
/// both ends of the population.
pub struct RingTopology {
    offsets: Vec<i64>,
}

impl RingTopology {
    pub fn new(shape: Neighborhood) -> Self {
        match shape {
            Neighborhood::Forward { width } => Self::forward(width),
            Neighborhood::Symmetric { radius } => Self::symmetric(radius),
        }
    }

    /// Window of `width` particles starting at the asker, walking forward.
    pub fn forward(width: usize) -> Self {
        Self {
            offsets: (0..width as i64).collect(),
        }
    }

    /// The asker plus `radius` particles on each side.
    pub fn symmetric(radius: usize) -> Self {
        let r = radius as i64;
        Self {
            offsets: (-r..=r).collect(),
        }
    }

    fn wrapped_id(id: i64, population: usize) -> ParticleId {
        id.rem_euclid(population as i64) as ParticleId
    }

    fn neighbor_ids(&self, asker: ParticleId, population: usize) -> Vec<ParticleId> {
        self.offsets
            .iter()
            .map(|&offset| Self::wrapped_id(asker as i64 + offset, population))
            .collect()
    }
}

impl Default for RingTopology {
    fn default() -> Self {
        Self::new(Neighborhood::default())
    }
}

impl Topology for RingTopology {
    fn update(&mut self, _swarm: &[Particle]) {
        // Social best is computed lazily per query. A sliding-window minimum
        // over the ring could precompute every neighborhood here in
        // O(population) instead of O(population * window).
    }

    fn social_best<'a>(&self, asker: ParticleId, swarm: &'a [Particle]) -> &'a Position {
        let neighbors = self.neighbor_ids(asker, swarm.len());

        // Linear scan, strict less-than: the first minimum wins ties.
        let mut best_id = neighbors[0];
        for &nid in &neighbors[1..] {
            if swarm[nid].best().fitness < swarm[best_id].best().fitness {
                best_id = nid;
            }
        }

        &swarm[best_id].best().position
    }
}

use tracing::debug;

use crate::core::{
    Fitness, InertiaMode, ParticleId, Position, Positions, SwarmConfig, SwarmError, Velocity,
    Weight,
};
use crate::rng::{SeededUniform, UniformSource};

use super::callback::{NullCallback, SwarmCallback};
use super::inertia::{FixedInertia, InertiaScaling, LinearInertia};
use super::objective::Objective;
use super::particle::{Evolution, Particle, State};
use super::topology::{RingTopology, Topology};

/// Owns the particle population, the topology and inertia strategies, the
/// uniform-deviate source, and the iteration loop. Particles are stored as a
/// dense vector indexed by their id; nothing outside the manager ever holds
/// one.
pub struct Manager {
    config: SwarmConfig,
    particles: Vec<Particle>,
    topology: Box<dyn Topology>,
    inertia: Box<dyn InertiaScaling>,
    rng: Box<dyn UniformSource>,
    objective: Box<dyn Objective>,
    iteration_count: usize,
}

impl Manager {
    /// Standard PSO: fixed inertia with the standard constriction weights.
    pub fn standard(
        seed: u64,
        dimensions: usize,
        particles: usize,
        iterations: usize,
        objective: Box<dyn Objective>,
    ) -> Result<Self, SwarmError> {
        Self::new(
            SwarmConfig::standard(seed, dimensions, particles, iterations),
            objective,
        )
    }

    /// Linear PSO: inertia annealed across the iteration budget with explicit
    /// cognitive/social weights.
    pub fn linear(
        seed: u64,
        dimensions: usize,
        particles: usize,
        iterations: usize,
        inertia_start: Weight,
        inertia_end: Weight,
        cognitive_weight: Weight,
        social_weight: Weight,
        objective: Box<dyn Objective>,
    ) -> Result<Self, SwarmError> {
        Self::new(
            SwarmConfig::linear(
                seed,
                dimensions,
                particles,
                iterations,
                inertia_start,
                inertia_end,
                cognitive_weight,
                social_weight,
            ),
            objective,
        )
    }

    pub fn new(config: SwarmConfig, objective: Box<dyn Objective>) -> Result<Self, SwarmError> {
        let rng = Box::new(SeededUniform::new(config.seed));
        Self::with_deviate_source(config, objective, rng)
    }

    /// Build with an explicit deviate source. Reproducibility across
    /// `reset()` requires that the source honor `reseed`.
    pub fn with_deviate_source(
        config: SwarmConfig,
        objective: Box<dyn Objective>,
        rng: Box<dyn UniformSource>,
    ) -> Result<Self, SwarmError> {
        config.validate()?;

        let inertia: Box<dyn InertiaScaling> = match config.inertia {
            InertiaMode::Fixed { weight } => Box::new(FixedInertia::new(weight)),
            InertiaMode::Linear { start, end } => Box::new(LinearInertia::new(start, end)),
        };
        let topology = Box::new(RingTopology::new(config.neighborhood));

        debug!(
            particles = config.particles,
            dimensions = config.dimensions,
            iterations = config.iterations,
            "creating swarm"
        );

        let mut manager = Self {
            config,
            particles: Vec::new(),
            topology,
            inertia,
            rng,
            objective,
            iteration_count: 0,
        };
        manager.create_particles();
        Ok(manager)
    }

    /// Swap in a different neighborhood strategy. Intended for topologies
    /// beyond the built-in ring; the population is untouched.
    pub fn with_topology(mut self, topology: Box<dyn Topology>) -> Self {
        self.topology = topology;
        self
    }

    /// Runs `iterate()` until the iteration budget is exhausted. There is no
    /// convergence criterion; the budget always runs in full.
    pub fn estimate(&mut self) -> Result<(), SwarmError> {
        self.estimate_with(&mut NullCallback)
    }

    /// Like `estimate()`, reporting the swarm best after every iteration.
    pub fn estimate_with(&mut self, callback: &mut dyn SwarmCallback) -> Result<(), SwarmError> {
        while self.keep_looping() {
            self.iterate()?;
            let fitness = self.get_fitness();
            let best = self.get_estimate().clone();
            callback.on_iteration(self.iteration_count, &best, fitness);
        }
        Ok(())
    }

    fn keep_looping(&self) -> bool {
        self.iteration_count < self.config.iterations
    }

    /// One full update cycle: topology refresh, evolution of every particle,
    /// one batched fitness evaluation, best-state bookkeeping.
    pub fn iterate(&mut self) -> Result<(), SwarmError> {
        debug!(iteration = self.iteration_count, "iterating swarm");

        self.topology.update(&self.particles);

        // Evolution phase. Social bests are snapshotted up front so every
        // particle sees the bests produced by the previous iteration, in
        // whatever order the population is walked.
        let weight = self
            .inertia
            .weight(self.iteration_count, self.config.iterations);
        let social_bests: Positions = self
            .particles
            .iter()
            .map(|p| self.topology.social_best(p.id(), &self.particles).clone())
            .collect();

        let cognitive = self.config.cognitive_weight;
        let social = self.config.social_weight;
        let max_speed = self.speed_cap();
        for (particle, social_best) in self.particles.iter_mut().zip(&social_bests) {
            let mut ctx = Evolution {
                inertia: weight,
                cognitive,
                social,
                social_best,
                max_speed,
                rng: self.rng.as_mut(),
            };
            particle.iterate(&mut ctx);
        }

        // Evaluation phase: one batched call; fitnesses come back in the
        // same order the positions were collected.
        let positions: Positions = self.particles.iter().map(|p| p.position().clone()).collect();
        let fitnesses = self.objective.evaluate(&positions);
        if fitnesses.len() != positions.len() {
            return Err(SwarmError::FitnessCountMismatch {
                expected: positions.len(),
                got: fitnesses.len(),
            });
        }
        for (particle, fitness) in self.particles.iter_mut().zip(fitnesses) {
            particle.update_fitness(fitness);
        }

        self.iteration_count += 1;
        Ok(())
    }

    /// Best position observed by any particle so far. Before the first
    /// evaluation every best carries the sentinel fitness, so this returns
    /// an arbitrary particle's initial state.
    pub fn get_estimate(&self) -> &Position {
        &self.best_particle().best().position
    }

    /// Fitness of the best position observed by any particle so far.
    pub fn get_fitness(&self) -> Fitness {
        self.best_particle().best().fitness
    }

    // Linear scan, strict less-than: the first minimum wins ties.
    fn best_particle(&self) -> &Particle {
        let mut best = &self.particles[0];
        for candidate in &self.particles[1..] {
            if candidate.best().fitness < best.best().fitness {
                best = candidate;
            }
        }
        best
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn num_iterations(&self) -> usize {
        self.config.iterations
    }

    pub fn num_dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Count of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration_count
    }

    /// Bounds-checked read access; a bad id is an error, never a default.
    pub fn particle(&self, id: ParticleId) -> Result<&Particle, SwarmError> {
        self.particles.get(id).ok_or(SwarmError::ParticleOutOfRange {
            id,
            population: self.particles.len(),
        })
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn max_speed_per_dimension(&self) -> f64 {
        self.config.max_speed
    }

    /// The cap value is retained while the constraint is disabled.
    pub fn set_max_speed_per_dimension(&mut self, speed: f64) {
        self.config.max_speed = speed;
    }

    pub fn enable_max_speed_per_dimension(&mut self) {
        self.config.max_speed_enabled = true;
    }

    pub fn disable_max_speed_per_dimension(&mut self) {
        self.config.max_speed_enabled = false;
    }

    pub fn is_enabled_max_speed_per_dimension(&self) -> bool {
        self.config.max_speed_enabled
    }

    /// Discards all particle state and the iteration counter, reseeds the
    /// deviate source, and draws a fresh population: the manager behaves
    /// like a newly constructed one with the same configuration.
    pub fn reset(&mut self) {
        debug!("resetting swarm");
        self.rng.reseed(self.config.seed);
        self.iteration_count = 0;
        self.create_particles();
    }

    fn create_particles(&mut self) {
        self.particles = Vec::with_capacity(self.config.particles);
        for id in 0..self.config.particles {
            let position = self.random_position();
            let velocity = self.random_velocity();
            self.particles
                .push(Particle::new(id, State::new(position, velocity)));
        }
    }

    fn random_position(&mut self) -> Position {
        (0..self.config.dimensions)
            .map(|_| self.rng.uniform(-1.0, 1.0))
            .collect()
    }

    fn random_velocity(&mut self) -> Velocity {
        (0..self.config.dimensions)
            .map(|_| self.rng.uniform(-1.0, 1.0))
            .collect()
    }

    fn speed_cap(&self) -> Option<f64> {
        if self.config.max_speed_enabled {
            Some(self.config.max_speed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WORST_POSSIBLE_FITNESS;
    use crate::rng::ScriptedUniform;
    use crate::swarm::objective::FnObjective;

    fn sphere_fitness(position: &Position) -> Fitness {
        position.iter().map(|x| x * x).sum()
    }

    fn sphere() -> Box<dyn Objective> {
        Box::new(FnObjective::new(sphere_fitness))
    }

    /// Returns the same fitness batch on every call.
    struct ConstBatch(Vec<Fitness>);

    impl Objective for ConstBatch {
        fn evaluate(&self, _positions: &Positions) -> Vec<Fitness> {
            self.0.clone()
        }
    }

    #[test]
    fn construction_validates_configuration() {
        assert!(Manager::standard(0, 0, 10, 10, sphere()).is_err());
        assert!(Manager::standard(0, 2, 0, 10, sphere()).is_err());
        assert!(Manager::standard(0, 2, 10, 10, sphere()).is_ok());
    }

    #[test]
    fn population_is_created_at_construction() {
        let manager = Manager::standard(1, 3, 7, 5, sphere()).unwrap();
        assert_eq!(manager.num_particles(), 7);
        assert_eq!(manager.num_dimensions(), 3);
        assert_eq!(manager.num_iterations(), 5);
        assert_eq!(manager.iteration(), 0);
        for id in 0..7 {
            let particle = manager.particle(id).unwrap();
            assert_eq!(particle.id(), id);
            assert_eq!(particle.position().len(), 3);
            assert_eq!(particle.best().fitness, WORST_POSSIBLE_FITNESS);
        }
    }

    #[test]
    fn initial_draws_lie_in_the_unit_cube() {
        let manager = Manager::standard(3, 4, 20, 1, sphere()).unwrap();
        for id in 0..20 {
            let particle = manager.particle(id).unwrap();
            assert!(particle.position().iter().all(|x| (-1.0..1.0).contains(x)));
            assert!(particle
                .current()
                .velocity
                .iter()
                .all(|v| (-1.0..1.0).contains(v)));
        }
    }

    #[test]
    fn bad_particle_id_is_an_error() {
        let manager = Manager::standard(0, 1, 3, 1, sphere()).unwrap();
        assert!(manager.particle(2).is_ok());
        assert_eq!(
            manager.particle(3),
            Err(SwarmError::ParticleOutOfRange {
                id: 3,
                population: 3
            })
        );
    }

    #[test]
    fn estimate_runs_the_full_budget() {
        let mut manager = Manager::standard(0, 2, 5, 13, sphere()).unwrap();
        manager.estimate().unwrap();
        assert_eq!(manager.iteration(), 13);
    }

    #[test]
    fn zero_budget_estimate_is_a_no_op() {
        let mut manager = Manager::standard(0, 2, 5, 0, sphere()).unwrap();
        manager.estimate().unwrap();
        assert_eq!(manager.iteration(), 0);
        assert_eq!(manager.get_fitness(), WORST_POSSIBLE_FITNESS);
    }

    #[test]
    fn fitness_batch_length_mismatch_is_fatal() {
        let mut manager = Manager::standard(
            0,
            1,
            4,
            1,
            Box::new(ConstBatch(vec![1.0, 2.0, 3.0])),
        )
        .unwrap();
        assert_eq!(
            manager.iterate(),
            Err(SwarmError::FitnessCountMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn geometric_velocity_decay_is_bit_exact() {
        // 1 dimension, 2 particles, 2 iterations, fixed inertia 0.5 and both
        // pull weights zero: each velocity halves per iteration and the
        // position is the running sum.
        let mut config = SwarmConfig::standard(0, 1, 2, 2);
        config.inertia = InertiaMode::Fixed { weight: 0.5 };
        config.cognitive_weight = 0.0;
        config.social_weight = 0.0;

        // Initialization consumes x0, v0, x1, v1; later draws are zeroed by
        // the weights but still consumed from the cycling script.
        let script = vec![0.2, 0.4, -0.3, -0.8];
        let source = Box::new(ScriptedUniform::new(script));
        let mut manager = Manager::with_deviate_source(config, sphere(), source).unwrap();
        manager.estimate().unwrap();

        // Replay the exact float operations per particle.
        let expect = |x0: f64, v0: f64| {
            let (mut x, mut v) = (x0, v0);
            for _ in 0..2 {
                v *= 0.5;
                x += v;
            }
            (x, v)
        };
        let (x0_final, v0_final) = expect(0.2, 0.4);
        let (x1_final, v1_final) = expect(-0.3, -0.8);

        let p0 = manager.particle(0).unwrap();
        assert_eq!(p0.current().position[0], x0_final);
        assert_eq!(p0.current().velocity[0], v0_final);
        let p1 = manager.particle(1).unwrap();
        assert_eq!(p1.current().position[0], x1_final);
        assert_eq!(p1.current().velocity[0], v1_final);

        // Both particles stay in bounds; the swarm best is particle 0's
        // first-iteration position (closer to the origin than any later one).
        let best_x0 = 0.2 + 0.5 * 0.4;
        assert_eq!(manager.get_estimate(), &vec![best_x0]);
        assert_eq!(manager.get_fitness(), best_x0 * best_x0);
    }

    #[test]
    fn swapped_fitness_batches_swap_which_particle_improves() {
        // Keep everything stationary so positions stay in bounds: zero
        // initial velocities via an all-zero script and zero weights.
        let mut config = SwarmConfig::standard(0, 1, 2, 1);
        config.inertia = InertiaMode::Fixed { weight: 0.0 };
        config.cognitive_weight = 0.0;
        config.social_weight = 0.0;

        let mut forward = Manager::with_deviate_source(
            config.clone(),
            Box::new(ConstBatch(vec![1.0, 2.0])),
            Box::new(ScriptedUniform::new(vec![0.0])),
        )
        .unwrap();
        forward.estimate().unwrap();
        assert_eq!(forward.particle(0).unwrap().best().fitness, 1.0);
        assert_eq!(forward.particle(1).unwrap().best().fitness, 2.0);

        let mut swapped = Manager::with_deviate_source(
            config,
            Box::new(ConstBatch(vec![2.0, 1.0])),
            Box::new(ScriptedUniform::new(vec![0.0])),
        )
        .unwrap();
        swapped.estimate().unwrap();
        assert_eq!(swapped.particle(0).unwrap().best().fitness, 2.0);
        assert_eq!(swapped.particle(1).unwrap().best().fitness, 1.0);
    }

    #[test]
    fn swarm_best_scan_takes_the_first_minimum() {
        // Zero weights keep every particle at its scripted initial position,
        // so the tied particles are distinguishable by position.
        let mut config = SwarmConfig::standard(0, 1, 3, 1);
        config.inertia = InertiaMode::Fixed { weight: 0.0 };
        config.cognitive_weight = 0.0;
        config.social_weight = 0.0;

        let script = vec![0.1, 0.0, 0.2, 0.0, 0.3, 0.0];
        let mut manager = Manager::with_deviate_source(
            config,
            Box::new(ConstBatch(vec![2.0, 1.0, 1.0])),
            Box::new(ScriptedUniform::new(script)),
        )
        .unwrap();
        manager.iterate().unwrap();

        assert_eq!(manager.get_fitness(), 1.0);
        // Particles 1 and 2 tie; the scan must report particle 1's position.
        assert_eq!(manager.get_estimate(), &vec![0.2]);
    }

    #[test]
    fn custom_topologies_plug_into_the_manager() {
        // Every particle sees the whole swarm: classic global-best PSO.
        struct GlobalBest;

        impl Topology for GlobalBest {
            fn update(&mut self, _swarm: &[Particle]) {}

            fn social_best<'a>(&self, _asker: usize, swarm: &'a [Particle]) -> &'a Position {
                let mut best = &swarm[0];
                for candidate in &swarm[1..] {
                    if candidate.best().fitness < best.best().fitness {
                        best = candidate;
                    }
                }
                &best.best().position
            }
        }

        let mut manager = Manager::standard(21, 2, 10, 15, sphere())
            .unwrap()
            .with_topology(Box::new(GlobalBest));
        manager.estimate().unwrap();
        assert_eq!(manager.iteration(), 15);
        assert_eq!(manager.get_estimate().len(), 2);
    }

    #[test]
    fn max_speed_surface_retains_the_cap_across_toggling() {
        let mut manager = Manager::standard(0, 1, 2, 1, sphere()).unwrap();
        assert!(!manager.is_enabled_max_speed_per_dimension());

        manager.set_max_speed_per_dimension(0.125);
        manager.enable_max_speed_per_dimension();
        assert!(manager.is_enabled_max_speed_per_dimension());
        assert_eq!(manager.max_speed_per_dimension(), 0.125);

        manager.disable_max_speed_per_dimension();
        assert!(!manager.is_enabled_max_speed_per_dimension());
        assert_eq!(manager.max_speed_per_dimension(), 0.125);
    }

    #[test]
    fn enabled_speed_cap_clamps_every_velocity_component() {
        let mut config = SwarmConfig::standard(0, 3, 4, 1);
        config.max_speed = 0.05;
        config.max_speed_enabled = true;
        let mut manager = Manager::new(config, sphere()).unwrap();
        manager.estimate().unwrap();

        for id in 0..4 {
            let particle = manager.particle(id).unwrap();
            assert!(particle
                .current()
                .velocity
                .iter()
                .all(|v| v.abs() <= 0.05));
        }
    }

    #[test]
    fn reset_reproduces_a_fresh_manager_exactly() {
        let config = SwarmConfig::standard(1234, 3, 10, 20);

        let mut fresh = Manager::new(config.clone(), sphere()).unwrap();
        fresh.estimate().unwrap();
        let fresh_estimate = fresh.get_estimate().clone();
        let fresh_fitness = fresh.get_fitness();

        let mut reused = Manager::new(config, sphere()).unwrap();
        reused.estimate().unwrap();
        reused.reset();
        assert_eq!(reused.iteration(), 0);
        assert_eq!(reused.get_fitness(), WORST_POSSIBLE_FITNESS);
        reused.estimate().unwrap();

        assert_eq!(reused.get_estimate(), &fresh_estimate);
        assert_eq!(reused.get_fitness(), fresh_fitness);
    }
}

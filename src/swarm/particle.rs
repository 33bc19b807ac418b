use crate::core::{
    within_search_bounds, Fitness, ParticleId, Position, Velocity, Weight,
    WORST_POSSIBLE_FITNESS,
};
use crate::rng::UniformSource;

/// A particle's position, velocity and fitness at one point in time; either
/// the current state or the personal best.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub position: Position,
    pub velocity: Velocity,
    pub fitness: Fitness,
}

impl State {
    /// Fresh state with the worst-possible fitness, so any real evaluation
    /// counts as an improvement.
    pub fn new(position: Position, velocity: Velocity) -> Self {
        Self {
            position,
            velocity,
            fitness: WORST_POSSIBLE_FITNESS,
        }
    }
}

/// Swarm-level values a particle needs for one update step. Borrowed from
/// the manager for the duration of a single `iterate` call.
pub struct Evolution<'a> {
    pub inertia: Weight,
    pub cognitive: Weight,
    pub social: Weight,
    pub social_best: &'a Position,
    /// Per-dimension speed cap; `None` leaves velocities unconstrained.
    pub max_speed: Option<f64>,
    pub rng: &'a mut dyn UniformSource,
}

/// One candidate solution: current state plus the best state it has observed.
#[derive(Debug, PartialEq)]
pub struct Particle {
    id: ParticleId,
    current: State,
    best: State,
}

impl Particle {
    pub fn new(id: ParticleId, initial: State) -> Self {
        Self {
            id,
            best: initial.clone(),
            current: initial,
        }
    }

    /// One update step: evolve velocity, evolve position, apply the combined
    /// position and velocity constraint. Mutates `current` only.
    pub fn iterate(&mut self, ctx: &mut Evolution<'_>) {
        self.evolve_velocity(ctx);
        self.evolve_position();
        self.apply_position_and_velocity_constraint(ctx.max_speed);
    }

    /// `v[d] = w*v[d] + c1*u1*(best[d] - x[d]) + c2*u2*(social[d] - x[d])`
    ///
    /// u1 and u2 are fresh draws for every dimension, consumed even when a
    /// weight is zero so the deviate stream stays aligned.
    fn evolve_velocity(&mut self, ctx: &mut Evolution<'_>) {
        for d in 0..self.current.velocity.len() {
            let u1 = ctx.rng.uniform(0.0, 1.0);
            let u2 = ctx.rng.uniform(0.0, 1.0);

            let v_inertia = ctx.inertia * self.current.velocity[d];
            let v_cognitive =
                ctx.cognitive * u1 * (self.best.position[d] - self.current.position[d]);
            let v_social = ctx.social * u2 * (ctx.social_best[d] - self.current.position[d]);

            self.current.velocity[d] = v_inertia + v_cognitive + v_social;
        }
        self.apply_velocity_constraint(ctx.max_speed);
    }

    /// `x[d] = x[d] + v[d]`
    fn evolve_position(&mut self) {
        for d in 0..self.current.position.len() {
            self.current.position[d] += self.current.velocity[d];
        }
        self.apply_position_constraint();
    }

    /// Sign-preserving clamp to the speed cap; idempotent.
    fn apply_velocity_constraint(&mut self, max_speed: Option<f64>) {
        if let Some(cap) = max_speed {
            for v in &mut self.current.velocity {
                *v = v.clamp(-cap, cap);
            }
        }
    }

    /// Soft boundary: positions may leave the normalized range. Escaped
    /// positions are penalized through the fitness sentinel in
    /// `update_fitness`, never repositioned.
    fn apply_position_constraint(&mut self) {}

    fn apply_position_and_velocity_constraint(&mut self, max_speed: Option<f64>) {
        self.apply_velocity_constraint(max_speed);
        self.apply_position_constraint();
    }

    /// Records the fitness for the current position. Out-of-bounds positions
    /// get the worst-possible sentinel regardless of the value passed in.
    /// `best` is replaced only on strict improvement; the first best found
    /// wins ties.
    pub fn update_fitness(&mut self, fitness: Fitness) {
        self.current.fitness = if within_search_bounds(&self.current.position) {
            fitness
        } else {
            WORST_POSSIBLE_FITNESS
        };

        self.update_best();
    }

    fn update_best(&mut self) {
        if self.current.fitness < self.best.fitness {
            self.best = self.current.clone();
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> &Position {
        &self.current.position
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    pub fn best(&self) -> &State {
        &self.best
    }
}

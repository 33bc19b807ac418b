//! Particle swarm optimization engine.
//!
//! A swarm of candidate solutions iteratively minimizes an arbitrary
//! objective over the normalized search cube `[-1, 1]^N`. Information
//! sharing between particles (topology), inertia scheduling, the objective
//! function, and the uniform-deviate source are all pluggable strategy
//! points; the [`Manager`] owns the population and drives the loop with one
//! batched fitness evaluation per iteration.

mod core;
mod rng;
mod swarm;

pub use crate::core::*;
pub use crate::rng::{SeededUniform, UniformSource};
pub use crate::swarm::*;

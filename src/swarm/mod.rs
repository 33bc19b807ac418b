pub mod callback;
pub mod inertia;
pub mod manager;
pub mod objective;
pub mod particle;
pub mod topology;

pub use callback::{HistoryCallback, IterationRecord, NullCallback, SwarmCallback};
pub use inertia::{FixedInertia, InertiaScaling, LinearInertia};
pub use manager::Manager;
pub use objective::{FnObjective, Objective, ParallelFnObjective};
pub use particle::{Evolution, Particle, State};
pub use topology::{RingTopology, Topology};

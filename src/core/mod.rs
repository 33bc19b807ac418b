pub mod config;
pub mod error;
pub mod types;

pub use config::{InertiaMode, Neighborhood, SwarmConfig, DEFAULT_MAX_SPEED};
pub use error::SwarmError;
pub use types::*;

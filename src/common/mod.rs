pub mod config;
pub mod material;

pub use config::{SolverConfig, WorldConfig};
pub use material::{CombinedMaterial, Material};

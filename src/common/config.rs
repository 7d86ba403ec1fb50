//! Tunable constants of the solver and the world step.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Fraction of the overlap removed when both bodies are dynamic.
    /// Each body moves half of `overlap * response_coefficient`.
    pub response_coefficient: f64,
    /// Tangential speeds below this produce no friction impulse.
    pub friction_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            response_coefficient: 0.9,
            friction_threshold: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Acceleration applied to every dynamic body.
    pub gravity: Vec2,
    pub solver: SolverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            solver: SolverConfig::default(),
        }
    }
}

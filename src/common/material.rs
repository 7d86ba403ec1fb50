//! Defines physical material properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the physical properties of a rigid body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Friction coefficient while the contact is sticking. Range [0, infinity).
    pub static_friction: f64,
    /// Friction coefficient once the contact slides. Range [0, infinity).
    pub dynamic_friction: f64,
}

/// Coefficients used to resolve one contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedMaterial {
    pub restitution: f64,
    pub static_friction: f64,
    pub dynamic_friction: f64,
}

impl Material {
    /// Creates a new material, clamping values to their valid ranges.
    pub fn new(restitution: f64, static_friction: f64, dynamic_friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }

    /// Coefficients for a contact between two materials: the lower
    /// restitution wins, frictions use the geometric mean.
    pub fn combine(&self, other: &Material) -> CombinedMaterial {
        CombinedMaterial {
            restitution: self.restitution.min(other.restitution),
            static_friction: (self.static_friction * other.static_friction).sqrt(),
            dynamic_friction: (self.dynamic_friction * other.dynamic_friction).sqrt(),
        }
    }
}

impl Default for Material {
    /// Default material properties (moderate restitution, moderate friction).
    fn default() -> Self {
        Material {
            restitution: 0.2,
            static_friction: 0.5,
            dynamic_friction: 0.3,
        }
    }
}

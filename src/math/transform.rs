use super::vec2::Vec2;

/// Position and orientation of a body. Rotation is an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64,
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.position
    }

    pub fn rot(&self) -> f64 {
        self.rotation
    }

    pub fn set_pos(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_rot(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

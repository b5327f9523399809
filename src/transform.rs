//! Model-to-world placement of a mesh.

use crate::math::{Mat4, Vec3};

/// Position, Euler rotation (radians) and per-axis scale of a mesh.
///
/// Setters chain:
///
/// ```
/// use softrender::Transform;
///
/// let mut transform = Transform::new();
/// transform
///     .set_position_xyz(0.0, 0.0, 5.0)
///     .rotate_x(0.25)
///     .set_scale_uniform(0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity placement: origin, no rotation, unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Moves by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Adds `delta` to each Euler angle.
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// World matrix `T * Rz * Ry * Rx * S`: a point is scaled, rotated about
    /// x, then y, then z, then moved.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

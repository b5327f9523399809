//! Flat-shading light source.

use crate::math::Vec3;

/// Parallel light travelling along a fixed direction.
///
/// The direction lives in camera space, the same space the pipeline computes
/// face normals in, so the light stays fixed relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector the light travels along.
    direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light shining straight into the screen.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl DirectionalLight {
    /// `direction` does not need to be unit length. A zero vector gives a
    /// light that leaves every face black.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    /// Brightness of a face with unit `normal`, in `[0, 1]`.
    ///
    /// `clamp(-dot(direction, normal), 0, 1)`: a face turned against the
    /// light's travel is lit, one turned with it is black.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        let facing = -self.direction.dot(normal);
        facing.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_1_SQRT_2;

    #[test]
    fn face_toward_camera_is_fully_lit_by_default() {
        let light = DirectionalLight::default();
        assert_eq!(light.intensity(Vec3::new(0.0, 0.0, -1.0)), 1.0);
        assert_eq!(light.intensity(Vec3::FORWARD), 0.0);
    }

    #[test]
    fn grazing_angle_scales_by_cosine() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let tilted = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert_relative_eq!(light.intensity(tilted), FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_eq!(light.intensity(Vec3::RIGHT), 0.0);
    }

    #[test]
    fn direction_is_stored_normalized() {
        let mut light = DirectionalLight::new(Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(light.direction(), Vec3::FORWARD);
        light.set_direction(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(light.direction(), Vec3::RIGHT);
    }

    #[test]
    fn oversized_normal_is_clamped() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(light.intensity(Vec3::new(0.0, 0.0, 2.0)), 1.0);
        assert_eq!(DirectionalLight::new(Vec3::ZERO).intensity(Vec3::UP), 0.0);
    }
}

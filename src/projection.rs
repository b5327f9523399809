//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all perspective
//! projection parameters (FOV, aspect ratio, near/far planes). It can generate
//! the projection matrix and view-space frustum planes for clipping.

use std::f32::consts::PI;

use crate::clipper::Frustum;
use crate::error::ConfigError;
use crate::math::Mat4;

/// Perspective projection parameters.
///
/// Stores the canonical projection parameters and provides methods to derive
/// the projection matrix and view-space frustum for clipping. The parameters are
/// validated on construction, so derived matrices never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians, in `(0, pi)`
    /// * `aspect_ratio` - Width divided by height (must be > 0)
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<Self, ConfigError> {
        // Written as negated comparisons so NaN is rejected too.
        if !(fov_y > 0.0 && fov_y < PI) {
            return Err(ConfigError::InvalidFov(fov_y));
        }
        if !(z_near > 0.0) {
            return Err(ConfigError::InvalidNear(z_near));
        }
        if !(z_far > z_near) {
            return Err(ConfigError::InvalidFar {
                near: z_near,
                far: z_far,
            });
        }
        Self::check_aspect(aspect_ratio)?;

        Ok(Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        })
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(
        fov_y_degrees: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    fn check_aspect(aspect_ratio: f32) -> Result<(), ConfigError> {
        if aspect_ratio > 0.0 && aspect_ratio.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::InvalidAspect(aspect_ratio))
        }
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<(), ConfigError> {
        Self::check_aspect(aspect_ratio)?;
        self.aspect_ratio = aspect_ratio;
        Ok(())
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Builds view-space frustum planes for clipping.
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.fov_x(), self.fov_y, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn fov_x_matches_aspect_ratio() {
        // With aspect ratio 1:1, fov_x should equal fov_y
        let proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0).unwrap();
        assert_relative_eq!(proj.fov_x(), proj.fov_y(), epsilon = 1e-6);
    }

    #[test]
    fn fov_x_wider_with_higher_aspect() {
        let proj = Projection::new(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0).unwrap();
        assert!(proj.fov_x() > proj.fov_y());
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0).unwrap();
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            Projection::new(FRAC_PI_4, 1.0, 0.0, 100.0),
            Err(ConfigError::InvalidNear(_))
        ));
        assert!(matches!(
            Projection::new(FRAC_PI_4, 1.0, 10.0, 10.0),
            Err(ConfigError::InvalidFar { .. })
        ));
        assert!(matches!(
            Projection::new(0.0, 1.0, 0.1, 100.0),
            Err(ConfigError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(PI, 1.0, 0.1, 100.0),
            Err(ConfigError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(f32::NAN, 1.0, 0.1, 100.0),
            Err(ConfigError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(FRAC_PI_4, 0.0, 0.1, 100.0),
            Err(ConfigError::InvalidAspect(_))
        ));
    }

    #[test]
    fn set_aspect_ratio_keeps_previous_value_on_error() {
        let mut proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0).unwrap();
        assert!(proj.set_aspect_ratio(-2.0).is_err());
        assert_eq!(proj.aspect_ratio(), 1.0);
        proj.set_aspect_ratio(2.0).unwrap();
        assert_eq!(proj.aspect_ratio(), 2.0);
    }

    #[test]
    fn frustum_edges_project_to_ndc_edges() {
        let proj = Projection::from_degrees(60.0, 4.0 / 3.0, 0.1, 100.0).unwrap();
        let frustum = proj.frustum();
        let matrix = proj.matrix();

        // A point on the right plane lands on ndc x = 1.
        let z = 7.0;
        let x = z * (proj.fov_x() / 2.0).tan();
        let on_plane = Vec3::new(x, 0.0, z);
        for plane in frustum.planes() {
            assert!(plane.signed_distance(on_plane) >= -1e-4);
        }
        let ndc = matrix.project(Vec4::from(on_plane)).unwrap();
        assert_relative_eq!(ndc.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.w, z);
    }
}

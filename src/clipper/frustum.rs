//! View-space frustum clipping.
//!
//! Planes are defined by point + normal pairs in camera space, where the eye
//! sits at the origin looking down +z. Normals point into the visible volume.
//!
//! ```text
//!            /|
//!          /  |
//!        /    |
//!  eye *------|---->  +z
//!        \    |
//!          \  |
//!            \|
//!     near        far
//! ```

use crate::error::ClipError;
use crate::math::Vec3;

use super::polygon::Polygon;

/// A plane defined by a point on the plane and its normal vector.
/// The normal points toward the "inside" (visible) half-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl FrustumPlane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal), Negative = outside.
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }
}

/// The six frustum sides, in clipping order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumSide {
    Left,
    Right,
    Top,
    Bottom,
    Near,
    Far,
}

impl FrustumSide {
    pub const ALL: [FrustumSide; 6] = [
        FrustumSide::Left,
        FrustumSide::Right,
        FrustumSide::Top,
        FrustumSide::Bottom,
        FrustumSide::Near,
        FrustumSide::Far,
    ];
}

/// View-space frustum defined by 6 clipping planes.
///
/// Built once per projection configuration and shared read-only while
/// clipping.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [FrustumPlane; 6],
}

impl Frustum {
    /// Creates a new view frustum from projection parameters.
    ///
    /// # Arguments
    /// * `fov_x` - Horizontal field of view in radians
    /// * `fov_y` - Vertical field of view in radians
    /// * `z_near` - Near clipping plane distance
    /// * `z_far` - Far clipping plane distance
    pub fn new(fov_x: f32, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        let (sin_x, cos_x) = (fov_x / 2.0).sin_cos();
        let (sin_y, cos_y) = (fov_y / 2.0).sin_cos();

        Self {
            planes: [
                FrustumPlane::new(Vec3::ZERO, Vec3::new(cos_x, 0.0, sin_x)),
                FrustumPlane::new(Vec3::ZERO, Vec3::new(-cos_x, 0.0, sin_x)),
                FrustumPlane::new(Vec3::ZERO, Vec3::new(0.0, -cos_y, sin_y)),
                FrustumPlane::new(Vec3::ZERO, Vec3::new(0.0, cos_y, sin_y)),
                FrustumPlane::new(Vec3::new(0.0, 0.0, z_near), Vec3::FORWARD),
                FrustumPlane::new(Vec3::new(0.0, 0.0, z_far), -Vec3::FORWARD),
            ],
        }
    }

    pub fn plane(&self, side: FrustumSide) -> &FrustumPlane {
        &self.planes[side as usize]
    }

    pub fn planes(&self) -> &[FrustumPlane; 6] {
        &self.planes
    }

    /// Returns true if `point` is inside or on every plane.
    pub fn contains(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= 0.0)
    }

    /// Clip a polygon against all frustum planes, in [`FrustumSide::ALL`] order.
    ///
    /// Returns the clipped polygon, which is empty if the input was entirely
    /// outside, or an error if an intermediate polygon would exceed its
    /// capacity.
    pub fn clip_polygon(&self, polygon: Polygon) -> Result<Polygon, ClipError> {
        let mut result = polygon;

        for plane in &self.planes {
            if result.is_clipped_away() {
                result.clear();
                break;
            }
            result = result.clip_against_plane(plane)?;
        }

        if result.is_clipped_away() {
            result.clear();
        }
        Ok(result)
    }
}

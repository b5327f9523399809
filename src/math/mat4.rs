//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Left-handed space: +x right, +y up, +z into the screen
//!
//! # Example
//! ```ignore
//! let transform = rotation * scale;  // scale applied first, then rotation
//! let result = transform * vertex;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// Smallest `|w|` accepted by [`Mat4::project`] before dividing.
pub const W_EPSILON: f32 = 1e-6;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a non-uniform scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (angle in radians).
    ///
    /// Same result as [`Vec3::rotate_x`].
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (angle in radians).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis (angle in radians).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a left-handed perspective projection matrix.
    ///
    /// Maps view-space `z` in `[near, far]` to NDC `z` in `[0, 1]` after the
    /// perspective divide, and copies view-space `z` into `w`.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near`, `far` - Clip distances, `0 < near < far`
    pub fn perspective_lh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let depth = far / (far - near);
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, depth, -near * depth],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Creates a view matrix with left-handed coordinate system.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    ///
    /// # Returns
    ///
    /// A view matrix that places `eye` at the origin looking down +z.
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);

        // Rotation matrix (transpose of basis vectors as rows)
        // Combined with translation to eye position
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Multiplies `v` and applies the perspective divide.
    ///
    /// Returns `(x/w, y/w, z/w, w)`, keeping the original `w` for depth. Returns
    /// `None` when `|w|` is below [`W_EPSILON`]; callers treat that vertex as
    /// rejected.
    pub fn project(&self, v: Vec4) -> Option<Vec4> {
        let clip = *self * v;
        if clip.w.abs() < W_EPSILON {
            return None;
        }
        Some(Vec4::new(
            clip.x / clip.w,
            clip.y / clip.w,
            clip.z / clip.w,
            clip.w,
        ))
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector), no divide.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn rotations_match_vector_helpers() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let angle = 0.7;
        assert_vec3_eq((Mat4::rotation_x(angle) * Vec4::from(v)).to_vec3(), v.rotate_x(angle));
        assert_vec3_eq((Mat4::rotation_y(angle) * Vec4::from(v)).to_vec3(), v.rotate_y(angle));
        assert_vec3_eq((Mat4::rotation_z(angle) * Vec4::from(v)).to_vec3(), v.rotate_z(angle));
    }

    #[test]
    fn scale_then_translate() {
        let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        let p = m * Vec4::point(1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(3.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn rotation_y_quarter_turn_maps_forward_to_right() {
        let p = Mat4::rotation_y(FRAC_PI_2) * Vec4::point(0.0, 0.0, 1.0);
        assert_vec3_eq(p.to_vec3(), Vec3::RIGHT);
    }

    #[test]
    fn look_at_down_positive_z_is_identity() {
        let view = Mat4::look_at_lh(Vec3::ZERO, Vec3::FORWARD, Vec3::UP);
        assert_eq!(view, Mat4::identity());
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let view = Mat4::look_at_lh(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::UP);
        let origin = view * Vec4::point(0.0, 0.0, 0.0);
        assert_vec3_eq(origin.to_vec3(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let m = Mat4::perspective_lh(FRAC_PI_3, 1.0, 0.1, 100.0);
        let near = m.project(Vec4::point(0.0, 0.0, 0.1)).unwrap();
        let far = m.project(Vec4::point(0.0, 0.0, 100.0)).unwrap();
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.w, 100.0);
    }

    #[test]
    fn perspective_maps_frustum_edge_to_ndc_edge() {
        // tan(30 deg) * z is the top edge of a 60 degree frustum.
        let m = Mat4::perspective_lh(FRAC_PI_3, 1.0, 0.1, 100.0);
        let z = 5.0;
        let p = m.project(Vec4::point(0.0, (FRAC_PI_3 / 2.0).tan() * z, z)).unwrap();
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn project_rejects_zero_w() {
        let m = Mat4::perspective_lh(FRAC_PI_3, 1.0, 0.1, 100.0);
        assert!(m.project(Vec4::point(1.0, 1.0, 0.0)).is_none());
    }
}

//! Triangle rasterization.
//!
//! The [`Rasterizer`] trait separates *which* pixels a triangle covers from
//! *what color* they get: implementors walk the covered pixels and hand each
//! one's barycentric weights to a [`PixelShader`].

mod scanline;
mod shader;

pub use scanline::ScanlineRasterizer;
pub use shader::{FlatShader, PixelShader, TextureShader};

use std::rc::Rc;

use super::framebuffer::FrameBuffer;
use crate::math::{Vec2, Vec4};
use crate::texture::Texture;

/// Triangles with less than this much doubled screen area are not drawn.
pub const MIN_TRIANGLE_AREA: f32 = 1e-6;

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    /// Screen x, screen y, NDC z and view-space w for each vertex.
    pub points: [Vec4; 3],
    pub uvs: [Vec2; 3],
    /// Flat color with lighting already applied.
    pub color: u32,
    /// Flat light intensity in `[0, 1]`, used to modulate texels.
    pub intensity: f32,
    pub texture: Option<Rc<Texture>>,
}

impl Triangle {
    pub fn new(points: [Vec4; 3], uvs: [Vec2; 3], color: u32, intensity: f32) -> Self {
        Self {
            points,
            uvs,
            color,
            intensity,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Option<Rc<Texture>>) -> Self {
        self.texture = texture;
        self
    }

    /// Screen-space positions of the three vertices.
    pub fn screen_points(&self) -> [Vec2; 3] {
        self.points.map(|p| Vec2::new(p.x, p.y))
    }
}

/// Precomputed edge vectors for barycentric weights against a fixed triangle.
#[derive(Clone, Copy, Debug)]
pub struct Barycentric {
    a: Vec2,
    ab: Vec2,
    ac: Vec2,
    inv_area: f32,
}

impl Barycentric {
    /// Returns `None` when the triangle's area is too small to divide by.
    pub fn new([a, b, c]: [Vec2; 3]) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let area = ab.cross(ac);
        if !(area.abs() >= MIN_TRIANGLE_AREA) {
            return None;
        }
        Some(Self {
            a,
            ab,
            ac,
            inv_area: 1.0 / area,
        })
    }

    /// Weights `[alpha, beta, gamma]` of `p` with respect to `a`, `b` and `c`.
    #[inline]
    pub fn weights(&self, p: Vec2) -> [f32; 3] {
        let ap = p - self.a;
        let beta = ap.cross(self.ac) * self.inv_area;
        let gamma = self.ab.cross(ap) * self.inv_area;
        [1.0 - beta - gamma, beta, gamma]
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Both fills test every pixel against the depth buffer using
/// `1 - 1/w`, with `1/w` interpolated from the triangle's vertices.
pub trait Rasterizer {
    /// Fill a triangle with a single color.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32);

    /// Fill a triangle with texels sampled at the interpolated UVs,
    /// modulated by the triangle's light intensity.
    fn fill_textured_triangle(&self, triangle: &Triangle, texture: &Texture, buffer: &mut FrameBuffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_at_vertices_are_unit() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];
        let bary = Barycentric::new(points).unwrap();
        assert_eq!(bary.weights(points[0]), [1.0, 0.0, 0.0]);
        assert_eq!(bary.weights(points[1]), [0.0, 1.0, 0.0]);
        assert_eq!(bary.weights(points[2]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn weights_sum_to_one_for_either_winding() {
        let p = Vec2::new(1.0, 1.5);
        for points in [
            [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)],
            [Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0), Vec2::new(4.0, 0.0)],
        ] {
            let [alpha, beta, gamma] = Barycentric::new(points).unwrap().weights(p);
            assert_relative_eq!(alpha + beta + gamma, 1.0, epsilon = 1e-6);
            let rebuilt = points[0] * alpha + points[1] * beta + points[2] * gamma;
            assert_relative_eq!(rebuilt.x, p.x, epsilon = 1e-5);
            assert_relative_eq!(rebuilt.y, p.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let collinear = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(Barycentric::new(collinear).is_none());
        let nan = [Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        assert!(Barycentric::new(nan).is_none());
    }
}

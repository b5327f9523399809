//! Scanline-based triangle rasterization.
//!
//! This module implements triangle rasterization using the classic scanline algorithm
//! with flat-top/flat-bottom triangle decomposition.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 2. **Decompose** the triangle into a flat-bottom and/or a flat-top half
//! 3. **Rasterize** each scanline by computing left/right edge intersections
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1    M
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! # Coverage
//!
//! Pixels are sampled at integer coordinates. A half spanning `[ya, yb)` covers
//! row `y` when `ceil(ya) <= y < ceil(yb)`, and within a row a span covers `x`
//! when `ceil(x_left) <= x < ceil(x_right)`.
//!
//! Each edge's x is computed from its own upper vertex,
//! `x = top.x + inv_slope * (y - top.y)`, so no error accumulates from row to
//! row and a shared edge evaluates identically in both triangles that use it:
//! the two halves of a triangle, and two triangles meeting along an edge,
//! partition the rows and columns on either side of it. Coverage is still
//! decided in `f32`, so a pixel centre lying within rounding error of an
//! edge may fall on either side of it.

use super::shader::{FlatShader, PixelShader, TextureShader};
use super::{Barycentric, Rasterizer, Triangle};
use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Edges whose vertical extent is below this are treated as horizontal.
const MIN_EDGE_HEIGHT: f32 = 1e-6;

/// Scanline-based triangle rasterizer.
///
/// The rasterizer handles vertex sorting internally, so input triangles can have
/// vertices in any order and either winding.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Calls `plot(x, y)` once for every pixel the triangle covers inside a
    /// `width` x `height` target.
    pub fn for_each_covered_pixel<F>(points: [Vec2; 3], width: u32, height: u32, mut plot: F)
    where
        F: FnMut(i32, i32),
    {
        let mut sorted = points;
        // `sort_by` is stable, so equal-y vertices keep their input order.
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
        let [v0, v1, v2] = sorted;
        let bounds = Bounds::new(width, height);

        // Every edge runs from its upper to its lower vertex.
        let long = Edge::new(v0, v2);
        if v1.y == v2.y {
            Self::walk_flat_bottom(v0.y, v1.y, Edge::new(v0, v1), long, &bounds, &mut plot);
        } else if v0.y == v1.y {
            Self::walk_flat_top(v0.y, v2.y, Edge::new(v1, v2), long, &bounds, &mut plot);
        } else {
            // The split point M lies on `long`, which is evaluated from v0 and
            // v2 in both halves.
            Self::walk_flat_bottom(v0.y, v1.y, Edge::new(v0, v1), long, &bounds, &mut plot);
            Self::walk_flat_top(v1.y, v2.y, Edge::new(v1, v2), long, &bounds, &mut plot);
        }
    }

    /// Walks the rows of a flat-bottom half top-down.
    ///
    /// ```text
    ///        v0 (apex)
    ///        /\
    ///       /  \
    ///      /____\
    ///   v1        v2  (same Y)
    /// ```
    fn walk_flat_bottom<F>(top: f32, bottom: f32, a: Edge, b: Edge, bounds: &Bounds, plot: &mut F)
    where
        F: FnMut(i32, i32),
    {
        for y in bounds.rows(top, bottom) {
            bounds.span(y, a.x_at(y), b.x_at(y), plot);
        }
    }

    /// Walks the rows of a flat-top half bottom-up.
    ///
    /// ```text
    ///   v0________v1  (same Y)
    ///     \      /
    ///      \    /
    ///       \  /
    ///        \/
    ///        v2 (apex)
    /// ```
    fn walk_flat_top<F>(top: f32, bottom: f32, a: Edge, b: Edge, bounds: &Bounds, plot: &mut F)
    where
        F: FnMut(i32, i32),
    {
        for y in bounds.rows(top, bottom).rev() {
            bounds.span(y, a.x_at(y), b.x_at(y), plot);
        }
    }

    /// Rasterizes `triangle` with `shader`, depth testing every pixel.
    ///
    /// Barycentric weights are taken against the unsorted vertices, so they
    /// line up with the triangle's per-vertex attributes. Triangles with
    /// near-zero screen area are skipped.
    pub fn rasterize<S: PixelShader>(&self, triangle: &Triangle, shader: &S, buffer: &mut FrameBuffer) {
        let points = triangle.screen_points();
        let Some(barycentric) = Barycentric::new(points) else {
            return;
        };
        let inv_w = triangle.points.map(|p| 1.0 / p.w);
        let (width, height) = (buffer.width(), buffer.height());

        Self::for_each_covered_pixel(points, width, height, |x, y| {
            let lambda = barycentric.weights(Vec2::new(x as f32, y as f32));
            let reciprocal_w = lambda[0] * inv_w[0] + lambda[1] * inv_w[1] + lambda[2] * inv_w[2];
            let depth = 1.0 - reciprocal_w;
            buffer.set_pixel_with_depth(x, y, depth, shader.shade(lambda));
        });
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32) {
        self.rasterize(triangle, &FlatShader::new(color), buffer);
    }

    fn fill_textured_triangle(&self, triangle: &Triangle, texture: &Texture, buffer: &mut FrameBuffer) {
        let shader = TextureShader::new(texture, triangle.uvs, triangle.intensity);
        self.rasterize(triangle, &shader, buffer);
    }
}

/// A triangle edge, stored from its upper to its lower vertex.
///
/// Two triangles sharing an edge build it from the same endpoints in the same
/// order, so both compute bit-identical x positions along it.
#[derive(Clone, Copy)]
struct Edge {
    top: Vec2,
    inv_slope: f32,
}

impl Edge {
    fn new(top: Vec2, bottom: Vec2) -> Self {
        let dy = bottom.y - top.y;
        let inv_slope = if dy.abs() < MIN_EDGE_HEIGHT {
            0.0
        } else {
            (bottom.x - top.x) / dy
        };
        Self { top, inv_slope }
    }

    #[inline]
    fn x_at(&self, y: i32) -> f32 {
        self.top.x + self.inv_slope * (y as f32 - self.top.y)
    }
}

/// Pixel rectangle the walk is clamped to.
struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Rows `ceil(top) <= y < ceil(bottom)` that lie inside the target.
    fn rows(&self, top: f32, bottom: f32) -> std::ops::Range<i32> {
        let start = top.ceil().max(0.0);
        let end = bottom.ceil().min(self.height);
        start as i32..end as i32
    }

    fn span<F>(&self, y: i32, x1: f32, x2: f32, plot: &mut F)
    where
        F: FnMut(i32, i32),
    {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = left.ceil().max(0.0) as i32;
        let end = right.ceil().min(self.width) as i32;
        for x in start..end {
            plot(x, y);
        }
    }
}

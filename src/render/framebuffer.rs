//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.

use crate::math::Vec2;

/// Side length in pixels of the marker drawn on each vertex in dot mode.
pub const VERTEX_MARKER_SIZE: i32 = 6;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores `1 - 1/w` for each pixel, where `w` is the
/// view-space depth. Smaller values are nearer to the camera, and a cleared
/// buffer holds [`DEPTH_FAR`](super::DEPTH_FAR).
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// Both slices must hold exactly `width * height` values.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            width as usize * height as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a pixel without depth testing (for overlays, grid, wireframe).
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly smaller than the stored
    /// depth at that location. Returns whether the write happened.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Draws a line with the DDA algorithm, both endpoints inclusive.
    ///
    /// Steps one pixel at a time along the axis with the greater delta and
    /// rounds the other coordinate. Only the steps that can land inside the
    /// buffer are walked, so far off-screen endpoints cost nothing extra.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = i64::from(x1) - i64::from(x0);
        let dy = i64::from(y1) - i64::from(y0);
        let side_length = dx.abs().max(dy.abs());

        if side_length == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let x_increment = dx as f64 / side_length as f64;
        let y_increment = dy as f64 / side_length as f64;
        let Some((first, last)) = self.visible_steps(
            (f64::from(x0), f64::from(y0)),
            (x_increment, y_increment),
            side_length,
        ) else {
            return;
        };

        for step in first..=last {
            let x = f64::from(x0) + x_increment * step as f64;
            let y = f64::from(y0) + y_increment * step as f64;
            self.set_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    /// Range of DDA steps in `0..=side_length` whose position lies within one
    /// pixel of the buffer, or `None` if the line misses it.
    fn visible_steps(
        &self,
        start: (f64, f64),
        increment: (f64, f64),
        side_length: i64,
    ) -> Option<(i64, i64)> {
        let mut low = 0.0_f64;
        let mut high = side_length as f64;
        let axes = [
            (start.0, increment.0, f64::from(self.width)),
            (start.1, increment.1, f64::from(self.height)),
        ];
        for (origin, step, extent) in axes {
            let (min, max) = (-1.0, extent);
            if step == 0.0 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }
            let (a, b) = ((min - origin) / step, (max - origin) / step);
            low = low.max(a.min(b));
            high = high.min(a.max(b));
        }
        if low > high {
            return None;
        }
        let first = (low.floor() as i64).max(0);
        let last = (high.ceil() as i64).min(side_length);
        Some((first, last))
    }

    /// Fills the part of the `width` x `height` rectangle at `(x, y)` that lies
    /// inside the buffer.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        let clamp_span = |start: i32, length: i32, limit: u32| {
            let begin = i64::from(start).max(0);
            let end = (i64::from(start) + i64::from(length)).min(i64::from(limit));
            begin as usize..end.max(begin) as usize
        };
        let columns = clamp_span(x, width, self.width);
        if columns.is_empty() {
            return;
        }
        let stride = self.width as usize;
        for row in clamp_span(y, height, self.height) {
            self.color_buffer[row * stride + columns.start..row * stride + columns.end].fill(color);
        }
    }

    /// Draws the outline of a triangle as three lines.
    pub fn draw_triangle(&mut self, points: [Vec2; 3], color: u32) {
        let [p0, p1, p2] = points.map(|p| (p.x.round() as i32, p.y.round() as i32));
        self.draw_line(p0.0, p0.1, p1.0, p1.1, color);
        self.draw_line(p1.0, p1.1, p2.0, p2.1, color);
        self.draw_line(p2.0, p2.1, p0.0, p0.1, color);
    }

    /// Draws a square marker centred on `point`.
    pub fn draw_vertex_marker(&mut self, point: Vec2, color: u32) {
        let half = VERTEX_MARKER_SIZE / 2;
        self.draw_rect(
            (point.x.round() as i32).saturating_sub(half),
            (point.y.round() as i32).saturating_sub(half),
            VERTEX_MARKER_SIZE,
            VERTEX_MARKER_SIZE,
            color,
        );
    }

    /// Draws a grid line on every row and column that is a multiple of `spacing`.
    /// A spacing of zero draws nothing.
    pub fn draw_grid(&mut self, spacing: u32, color: u32) {
        if spacing == 0 || self.width == 0 {
            return;
        }
        let width = self.width as usize;
        for (y, row) in self.color_buffer.chunks_exact_mut(width).enumerate() {
            if y as u32 % spacing == 0 {
                row.fill(color);
            } else {
                for pixel in row.iter_mut().step_by(spacing as usize) {
                    *pixel = color;
                }
            }
        }
    }
}

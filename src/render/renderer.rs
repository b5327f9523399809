//! Owner of the color and depth buffers.
//!
//! Provides the [`Renderer`] struct which owns the per-pixel storage and hands
//! out [`FrameBuffer`] views for drawing.

use super::framebuffer::FrameBuffer;
use super::DEPTH_FAR;
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![DEPTH_FAR; size],
            width,
            height,
        }
    }

    /// Reallocates both buffers for the new size. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = width as usize * height as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![DEPTH_FAR; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Clear the depth buffer to prepare for a new frame.
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(DEPTH_FAR);
    }

    /// The ARGB8888 color buffer, row-major.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes in native endianness, ready for upload
    /// to an `ARGB8888` texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut renderer = Renderer::new(4, 3);
        {
            let mut fb = renderer.as_framebuffer();
            fb.set_pixel_with_depth(1, 1, 0.25, 0xFF112233);
        }
        assert_eq!(renderer.color_buffer()[5], 0xFF112233);
        assert_eq!(renderer.depth_buffer()[5], 0.25);

        renderer.clear(0xFF000000);
        renderer.clear_depth();
        assert!(renderer.color_buffer().iter().all(|&c| c == 0xFF000000));
        assert!(renderer.depth_buffer().iter().all(|&d| d == DEPTH_FAR));
    }

    #[test]
    fn resize_reallocates_buffers() {
        let mut renderer = Renderer::new(4, 3);
        renderer.resize(8, 2);
        assert_eq!((renderer.width(), renderer.height()), (8, 2));
        assert_eq!(renderer.color_buffer().len(), 16);
        assert_eq!(renderer.depth_buffer().len(), 16);
    }

    #[test]
    fn byte_view_matches_native_layout() {
        let mut renderer = Renderer::new(1, 1);
        renderer.clear(0xAABBCCDD);
        assert_eq!(renderer.as_bytes(), &0xAABBCCDDu32.to_ne_bytes());
    }
}

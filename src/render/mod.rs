//! Pixel buffers and triangle rasterization.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    Barycentric, FlatShader, PixelShader, Rasterizer, ScanlineRasterizer, TextureShader, Triangle,
};
pub use renderer::Renderer;

/// Depth value of a cleared pixel; anything drawn is nearer.
pub const DEPTH_FAR: f32 = f32::INFINITY;

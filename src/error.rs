//! Error types for setup, asset loading and clipping.
//!
//! Setup and loading errors are fatal and surface once, before the frame loop
//! starts. [`ClipError`] is the only error produced while rendering; the
//! pipeline handles it by skipping the offending face.

use thiserror::Error;

/// Invalid renderer or projection configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Near plane must be positive, got {0}")]
    InvalidNear(f32),
    #[error("Far plane ({far}) must be greater than near plane ({near})")]
    InvalidFar { near: f32, far: f32 },
    #[error("Vertical field of view must be in (0, pi) radians, got {0}")]
    InvalidFov(f32),
    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),
    #[error("Viewport must be at least 1x1, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
    #[error("Triangle budget per frame must be at least 1")]
    ZeroTriangleBudget,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to build a mesh or texture from external data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("Texture data has {actual} pixels, expected {width}x{height}")]
    TextureSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("Texture must be at least 1x1, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
}

/// Failure while clipping a polygon against the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipError {
    #[error("Clipped polygon exceeds {capacity} vertices")]
    PolygonOverflow { capacity: usize },
}

//! A CPU-based software 3D rasterizer.
//!
//! Meshes go through a fixed pipeline: model to world to camera space,
//! back-face culling, frustum clipping, perspective projection, flat lighting
//! and scanline rasterization with a depth buffer. Everything runs on the CPU
//! into a packed ARGB8888 color buffer; SDL2 is only used, behind the
//! `window` feature, to put that buffer on screen.
//!
//! # Quick Start
//!
//! ```
//! use softrender::prelude::*;
//!
//! let config = RenderConfig::default();
//! let mut engine = Engine::new(&config).unwrap();
//!
//! let mut cube = Mesh::cube();
//! cube.transform_mut().set_position_xyz(0.0, 0.0, 5.0);
//! let mut scene = Scene::new();
//! scene.add_mesh(cube);
//!
//! engine.update(&scene);
//! engine.render();
//! assert_eq!(engine.color_buffer().len(), 800 * 600);
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;
pub mod stats;
pub mod texture;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraMove};
pub use config::RenderConfig;
pub use engine::{Engine, RenderMode};
pub use error::{ClipError, ConfigError, LoadError};
pub use mesh::{Face, Mesh};
pub use projection::Projection;
pub use scene::Scene;
pub use stats::FrameStats;
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use softrender::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraMove};

    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, RenderMode};
    pub use crate::stats::FrameStats;

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Face, Mesh};
    pub use crate::scene::Scene;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Projection
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Window & Input
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

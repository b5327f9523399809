//! Core rendering engine.
//!
//! The [`Engine`] owns the pixel buffers, the projection and the camera. Each
//! frame is two calls: [`Engine::update`] runs the geometry pipeline over a
//! [`Scene`] and collects screen triangles, [`Engine::render`] rasterizes them.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::clipper::Frustum;
use crate::colors;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::light::DirectionalLight;
use crate::pipeline::FramePipeline;
use crate::projection::Projection;
use crate::render::{FrameBuffer, Rasterizer, Renderer, ScanlineRasterizer, Triangle};
use crate::scene::Scene;
use crate::stats::FrameStats;

/// Rendering mode presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Triangle edges only (key: 1)
    WireframeLine,
    /// Triangle edges and vertex markers (key: 2)
    WireframeDot,
    /// Flat-shaded fill (key: 3)
    Filled,
    /// Flat-shaded fill with edges on top (key: 4)
    #[default]
    FilledWireframe,
    /// Textured fill (key: 5)
    Textured,
    /// Textured fill with edges on top (key: 6)
    TexturedWireframe,
}

/// Which passes a [`RenderMode`] enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderFeatures {
    pub filled: bool,
    pub textured: bool,
    pub wireframe: bool,
    pub dots: bool,
}

impl RenderMode {
    /// All modes in key order.
    pub const ALL: [RenderMode; 6] = [
        RenderMode::WireframeLine,
        RenderMode::WireframeDot,
        RenderMode::Filled,
        RenderMode::FilledWireframe,
        RenderMode::Textured,
        RenderMode::TexturedWireframe,
    ];

    pub fn features(self) -> RenderFeatures {
        let mut features = RenderFeatures::default();
        match self {
            RenderMode::WireframeLine => features.wireframe = true,
            RenderMode::WireframeDot => {
                features.wireframe = true;
                features.dots = true;
            }
            RenderMode::Filled => features.filled = true,
            RenderMode::FilledWireframe => {
                features.filled = true;
                features.wireframe = true;
            }
            RenderMode::Textured => features.textured = true,
            RenderMode::TexturedWireframe => {
                features.textured = true;
                features.wireframe = true;
            }
        }
        features
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::WireframeLine => "wireframe",
            RenderMode::WireframeDot => "wireframe + vertices",
            RenderMode::Filled => "filled",
            RenderMode::FilledWireframe => "filled + wireframe",
            RenderMode::Textured => "textured",
            RenderMode::TexturedWireframe => "textured + wireframe",
        };
        f.write_str(name)
    }
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: ScanlineRasterizer,
    projection: Projection,
    frustum: Frustum,
    camera: Camera,
    light: DirectionalLight,
    render_mode: RenderMode,
    backface_culling: bool,
    draw_grid: bool,
    grid_spacing: u32,
    background: u32,
    max_triangles: usize,
    triangles: Vec<Triangle>,
    stats: FrameStats,
}

impl Engine {
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let projection = config.projection()?;
        info!(
            "Engine {}x{}, fov {} deg, near {}, far {}, mode {}",
            config.width,
            config.height,
            config.fov_y_degrees,
            config.z_near,
            config.z_far,
            config.render_mode
        );

        Ok(Self {
            renderer: Renderer::new(config.width, config.height),
            rasterizer: ScanlineRasterizer::new(),
            frustum: projection.frustum(),
            projection,
            camera: Camera::looking_at(config.camera_position, config.camera_target),
            light: DirectionalLight::new(config.light_direction),
            render_mode: config.render_mode,
            backface_culling: config.backface_culling,
            draw_grid: config.draw_grid,
            grid_spacing: config.grid_spacing,
            background: config.background_color,
            max_triangles: config.max_triangles,
            triangles: Vec::with_capacity(config.max_triangles),
            stats: FrameStats::default(),
        })
    }

    /// Runs the geometry pipeline over every mesh in `scene` and replaces the
    /// frame's triangle list.
    pub fn update(&mut self, scene: &Scene) -> &FrameStats {
        self.triangles.clear();
        let mut stats = FrameStats::default();

        let pipeline = FramePipeline {
            view: self.camera.view_matrix(),
            projection: self.projection.matrix(),
            frustum: &self.frustum,
            light: &self.light,
            width: self.renderer.width(),
            height: self.renderer.height(),
            backface_culling: self.backface_culling,
            max_triangles: self.max_triangles,
        };
        for mesh in scene.meshes() {
            pipeline.process_mesh(mesh, &mut self.triangles, &mut stats);
        }

        debug!("{}", stats);
        if stats.overflowed() {
            warn!(
                "Frame over capacity: {} triangles dropped (budget {}), {} faces overflowed the clipper",
                stats.dropped, self.max_triangles, stats.clip_overflows
            );
        }
        self.stats = stats;
        &self.stats
    }

    /// Rasterizes the triangles collected by the last [`Engine::update`].
    ///
    /// Fills go through the depth buffer. Edges and vertex markers are drawn
    /// afterwards on top of every fill.
    pub fn render(&mut self) {
        self.renderer.clear(self.background);
        self.renderer.clear_depth();

        let features = self.render_mode.features();
        let mut fb = self.renderer.as_framebuffer();

        if self.draw_grid {
            fb.draw_grid(self.grid_spacing, colors::GRID);
        }

        if features.filled || features.textured {
            for triangle in &self.triangles {
                match (&triangle.texture, features.textured) {
                    (Some(texture), true) => {
                        self.rasterizer.fill_textured_triangle(triangle, texture, &mut fb)
                    }
                    _ => self.rasterizer.fill_triangle(triangle, &mut fb, triangle.color),
                }
            }
        }

        if features.wireframe || features.dots {
            for triangle in &self.triangles {
                let points = triangle.screen_points();
                if features.wireframe {
                    fb.draw_triangle(points, colors::WIREFRAME);
                }
                if features.dots {
                    for point in points {
                        fb.draw_vertex_marker(point, colors::VERTEX);
                    }
                }
            }
        }
    }

    /// Resizes the pixel buffers and rebuilds the projection for the new aspect.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        self.projection
            .set_aspect_ratio(width as f32 / height as f32)?;
        self.frustum = self.projection.frustum();
        self.renderer.resize(width, height);
        self.triangles.clear();
        info!("Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }

    pub fn set_draw_grid(&mut self, enabled: bool) {
        self.draw_grid = enabled;
    }

    pub fn draw_grid(&self) -> bool {
        self.draw_grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Triangles produced by the last [`Engine::update`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Packed ARGB8888 pixels, row-major from the top-left.
    pub fn color_buffer(&self) -> &[u32] {
        self.renderer.color_buffer()
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_bytes(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Drawing access to the current frame, for overlays.
    pub fn frame_buffer(&mut self) -> FrameBuffer<'_> {
        self.renderer.as_framebuffer()
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::mesh::Mesh;
    use crate::texture::Texture;
    use std::rc::Rc;

    fn cube_scene() -> Scene {
        let mut cube = Mesh::cube();
        cube.transform_mut().set_position(Vec3::new(0.0, 0.0, 5.0));
        let mut scene = Scene::new();
        scene.add_mesh(cube);
        scene
    }

    fn engine(mode: RenderMode) -> Engine {
        let config = RenderConfig {
            render_mode: mode,
            draw_grid: false,
            ..RenderConfig::default()
        };
        Engine::new(&config).unwrap()
    }

    fn pixel(engine: &Engine, x: u32, y: u32) -> u32 {
        engine.color_buffer()[(y * engine.width() + x) as usize]
    }

    #[test]
    fn mode_features_match_presets() {
        let wire = RenderMode::WireframeDot.features();
        assert!(wire.wireframe && wire.dots && !wire.filled && !wire.textured);
        let textured = RenderMode::TexturedWireframe.features();
        assert!(textured.textured && textured.wireframe && !textured.filled);
        assert_eq!(RenderMode::default(), RenderMode::FilledWireframe);
        assert_eq!(RenderMode::ALL[2], RenderMode::Filled);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RenderConfig {
            z_near: 0.0,
            ..RenderConfig::default()
        };
        assert!(matches!(Engine::new(&config), Err(ConfigError::InvalidNear(_))));
    }

    #[test]
    fn cube_in_front_of_camera_shows_its_front_face() {
        let mut engine = engine(RenderMode::Filled);
        let stats = *engine.update(&cube_scene());
        assert_eq!(stats.faces, 12);
        assert_eq!(stats.culled, 10);
        assert_eq!(stats.triangles, 2);
        assert_eq!(engine.triangles().len(), 2);

        engine.render();
        // Inside the front face, away from its diagonal.
        assert_eq!(pixel(&engine, 400, 200), colors::FILL);
        assert_eq!(pixel(&engine, 5, 5), colors::BACKGROUND);
        let depth = engine.renderer.depth_buffer()[200 * 800 + 400];
        assert!(depth.is_finite());
    }

    #[test]
    fn wireframe_leaves_interior_unfilled() {
        let mut engine = engine(RenderMode::WireframeLine);
        engine.update(&cube_scene());
        engine.render();
        assert_eq!(pixel(&engine, 400, 200), colors::BACKGROUND);
        assert!(engine.color_buffer().contains(&colors::WIREFRAME));
        assert!(!engine.color_buffer().contains(&colors::FILL));
    }

    #[test]
    fn textured_mode_samples_the_mesh_texture() {
        let red = 0xFFFF0000;
        let mut scene = cube_scene();
        let texture = Rc::new(Texture::new(1, 1, vec![red]).unwrap());
        scene.meshes_mut()[0].set_texture(texture);

        let mut engine = engine(RenderMode::Textured);
        engine.update(&scene);
        engine.render();
        assert_eq!(pixel(&engine, 400, 200), red);

        // Without a texture the flat color is used instead.
        scene.meshes_mut()[0].clear_texture();
        engine.update(&scene);
        engine.render();
        assert_eq!(pixel(&engine, 400, 200), colors::FILL);
    }

    #[test]
    fn culling_can_be_disabled() {
        let mut engine = engine(RenderMode::Filled);
        engine.set_backface_culling(false);
        let stats = *engine.update(&cube_scene());
        assert_eq!(stats.culled, 0);
        assert!(stats.triangles > 2);
    }

    #[test]
    fn resize_rebuilds_projection() {
        let mut engine = engine(RenderMode::Filled);
        engine.resize(320, 200).unwrap();
        assert_eq!((engine.width(), engine.height()), (320, 200));
        assert_eq!(engine.color_buffer().len(), 320 * 200);
        assert!((engine.projection().aspect_ratio() - 1.6).abs() < 1e-6);
        assert!(matches!(
            engine.resize(0, 10),
            Err(ConfigError::InvalidViewport { width: 0, height: 10 })
        ));
        assert_eq!(engine.width(), 320);
    }

    #[test]
    fn small_budget_reports_dropped_triangles() {
        let config = RenderConfig {
            max_triangles: 1,
            ..RenderConfig::default()
        };
        let mut engine = Engine::new(&config).unwrap();
        let stats = *engine.update(&cube_scene());
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.dropped, 1);
        assert_eq!(engine.triangles().len(), 1);
    }
}

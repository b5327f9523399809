//! Renderer configuration.
//!
//! [`RenderConfig`] gathers everything needed to set up an [`Engine`](crate::Engine):
//! viewport size, projection, render options, camera and light. It is plain data
//! that round-trips through JSON; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors;
use crate::engine::RenderMode;
use crate::error::ConfigError;
use crate::math::Vec3;
use crate::projection::Projection;

/// Default per-frame triangle budget.
pub const DEFAULT_MAX_TRIANGLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub render_mode: RenderMode,
    pub backface_culling: bool,
    pub draw_grid: bool,
    /// Grid cell size in pixels. Zero disables the grid.
    pub grid_spacing: u32,
    pub max_triangles: usize,
    /// Packed ARGB8888 clear color.
    pub background_color: u32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Direction the light travels in, in camera space. Normalized on use.
    pub light_direction: Vec3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 100.0,
            render_mode: RenderMode::default(),
            backface_culling: true,
            draw_grid: true,
            grid_spacing: 10,
            max_triangles: DEFAULT_MAX_TRIANGLES,
            background_color: colors::BACKGROUND,
            camera_position: Vec3::ZERO,
            camera_target: Vec3::FORWARD,
            light_direction: Vec3::FORWARD,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Builds the projection described by this config.
    pub fn projection(&self) -> Result<Projection, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Projection::from_degrees(
            self.fov_y_degrees,
            self.aspect_ratio(),
            self.z_near,
            self.z_far,
        )
    }

    /// Checks every setting that would make rendering impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projection()?;
        if self.max_triangles == 0 {
            return Err(ConfigError::ZeroTriangleBudget);
        }
        Ok(())
    }
}

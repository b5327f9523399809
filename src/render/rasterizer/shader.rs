//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides which pixels a triangle covers and computes their
//! barycentric weights; a shader turns those weights into a color, similar to
//! how GPUs separate fixed-function rasterization from fragment shading.

use crate::colors::apply_intensity;
use crate::math::Vec2;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that sum to 1.0
/// inside the triangle and interpolate any per-vertex attribute:
/// `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric coordinates.
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Returns a constant color for all pixels.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> u32 {
        self.color
    }
}

/// Samples a texture at interpolated UV coordinates and scales the texel by
/// the triangle's flat light intensity.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    intensity: f32,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], intensity: f32) -> Self {
        Self {
            texture,
            uvs,
            intensity,
        }
    }

    #[inline]
    fn interpolate_uv(&self, lambda: [f32; 3]) -> (f32, f32) {
        let u = lambda[0] * self.uvs[0].x + lambda[1] * self.uvs[1].x + lambda[2] * self.uvs[2].x;
        let v = lambda[0] * self.uvs[0].y + lambda[1] * self.uvs[1].y + lambda[2] * self.uvs[2].y;
        (u, v)
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let (u, v) = self.interpolate_uv(lambda);
        apply_intensity(self.texture.sample(u, v), self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_shader_picks_texel_under_interpolated_uv() {
        let texture = Texture::new(2, 1, vec![0xFFFF0000, 0xFF00FF00]).unwrap();
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let shader = TextureShader::new(&texture, uvs, 1.0);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), 0xFFFF0000);
        assert_eq!(shader.shade([0.2, 0.8, 0.0]), 0xFF00FF00);
    }

    #[test]
    fn texture_shader_modulates_by_intensity() {
        let texture = Texture::new(1, 1, vec![0xFF804020]).unwrap();
        let shader = TextureShader::new(&texture, [Vec2::ZERO; 3], 0.5);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), 0xFF402010);
    }
}

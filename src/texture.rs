use std::path::Path;

use log::info;

use crate::colors;
use crate::error::LoadError;

/// Represents a 2D texture for texture mapping.
///
/// Texels are packed ARGB8888, row-major, with the origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps existing ARGB texel data, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u32>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyTexture { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(LoadError::TextureSizeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a texture from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, LoadError> {
        let data = bytes
            .chunks_exact(4)
            .map(|p| colors::from_rgba_bytes([p[0], p[1], p[2], p[3]]))
            .collect();
        Self::new(width, height, data)
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::from_rgba8(width, height, img.as_raw())
    }

    /// Two-color checkerboard with square cells of `cell` texels.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> Result<Self, LoadError> {
        let cell = cell.max(1);
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b }))
            .collect();
        Self::new(width, height, data)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// `(0, 0)` is the top-left texel. The texel index is `floor(u * width)`,
    /// `floor(v * height)` clamped into range, so UVs outside `[0, 1]` repeat
    /// the edge texels.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        // `as u32` saturates: negatives and NaN become 0.
        let x = ((u * self.width as f32).floor() as u32).min(self.width - 1);
        let y = ((v * self.height as f32).floor() as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Texture {
        // 2x2: red, green / blue, white
        Texture::new(2, 2, vec![0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF]).unwrap()
    }

    #[test]
    fn samples_nearest_texel() {
        let tex = quad();
        assert_eq!(tex.sample(0.25, 0.25), 0xFFFF0000);
        assert_eq!(tex.sample(0.75, 0.25), 0xFF00FF00);
        assert_eq!(tex.sample(0.25, 0.75), 0xFF0000FF);
        assert_eq!(tex.sample(0.75, 0.75), 0xFFFFFFFF);
    }

    #[test]
    fn clamps_out_of_range_uvs() {
        let tex = quad();
        assert_eq!(tex.sample(1.0, 1.0), 0xFFFFFFFF);
        assert_eq!(tex.sample(5.0, -3.0), 0xFF00FF00);
        assert_eq!(tex.sample(-0.5, 2.0), 0xFF0000FF);
        assert_eq!(tex.sample(f32::NAN, 0.0), 0xFFFF0000);
    }

    #[test]
    fn rejects_mismatched_data() {
        assert!(matches!(
            Texture::new(2, 2, vec![0; 3]),
            Err(LoadError::TextureSizeMismatch { actual: 3, .. })
        ));
        assert!(matches!(
            Texture::new(0, 4, Vec::new()),
            Err(LoadError::EmptyTexture { .. })
        ));
    }

    #[test]
    fn converts_rgba_bytes_to_argb() {
        let tex = Texture::from_rgba8(1, 1, &[0x11, 0x22, 0x33, 0x44]).unwrap();
        assert_eq!(tex.data(), &[0x44112233]);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = Texture::checkerboard(4, 4, 2, 1, 2).unwrap();
        assert_eq!(tex.sample(0.0, 0.0), 1);
        assert_eq!(tex.sample(0.6, 0.0), 2);
        assert_eq!(tex.sample(0.6, 0.6), 1);
    }
}

//! Packed ARGB8888 colors and the palette used by the renderer.
//!
//! Colors are stored as `0xAARRGGBB` in a `u32`, which matches SDL's
//! `ARGB8888` streaming texture format.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const GRID: u32 = 0xFF333333;
pub const FILL: u32 = 0xFFFFFFFF;
pub const WIREFRAME: u32 = 0xFFFFFF00;
pub const VERTEX: u32 = 0xFFFF0000;

/// Packs normalized channels into an ARGB color. Channels are clamped to [0, 1].
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpacks the RGB channels of an ARGB color into [0, 1].
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    (channel(16), channel(8), channel(0))
}

/// Scales the RGB channels of `color` by `intensity`, keeping alpha.
///
/// The factor is clamped to [0, 1] so every channel stays within 0..=255.
#[inline]
pub fn apply_intensity(color: u32, intensity: f32) -> u32 {
    let factor = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };
    let scale = |shift: u32| ((((color >> shift) & 0xFF) as f32 * factor) as u32) << shift;
    (color & 0xFF00_0000) | scale(16) | scale(8) | scale(0)
}

/// Converts a packed color into `[r, g, b, a]` bytes.
#[inline]
pub fn to_rgba_bytes(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

/// Converts `[r, g, b, a]` bytes into a packed color.
#[inline]
pub fn from_rgba_bytes([r, g, b, a]: [u8; 4]) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

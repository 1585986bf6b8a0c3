use serde::{Deserialize, Serialize};

/// Render-only color, channels in `[0, 1]`. Has no physical effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: RgbColor = RgbColor { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Pack as little-endian RGBA (alpha = 255), the layout canvas
    /// `ImageData` expects when read through a `Uint32Array`.
    pub fn to_rgba_u32(&self) -> u32 {
        let r = channel_to_u8(self.r) as u32;
        let g = channel_to_u8(self.g) as u32;
        let b = channel_to_u8(self.b) as u32;
        0xFF00_0000 | (b << 16) | (g << 8) | r
    }
}

#[inline]
fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

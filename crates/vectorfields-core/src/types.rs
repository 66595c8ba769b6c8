//! Color type shared by generators, lighting and the fade overlay

use serde::{Deserialize, Serialize};

use crate::fixed::{to_fixed, Fixed};

/// RGBA color with floating point components (nominally 0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Gray level on all three channels with the given alpha
    pub const fn gray(level: f32, a: f32) -> Self {
        Self::rgba(level, level, level, a)
    }

    /// Multiply the RGB channels by `factor`, keeping alpha
    pub fn scaled(&self, factor: f32) -> Self {
        Self::rgba(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Convert to 8-bit channels, saturating outside 0.0..=1.0
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c * 255.0) as u8)
    }

    /// Convert to 16.16 fixed-point channels
    pub fn to_fixed(&self) -> [Fixed; 4] {
        [to_fixed(self.r), to_fixed(self.g), to_fixed(self.b), to_fixed(self.a)]
    }

    /// Convert to an array [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

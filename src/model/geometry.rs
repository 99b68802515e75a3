//! Geometry and color value types.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in page coordinates (points, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl Rectangle {
    /// Create a rectangle from two corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Check if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Check if a point lies inside the rectangle (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (top, bottom) = (self.y1.min(self.y2), self.y1.max(self.y2));
        x >= left && x <= right && y >= top && y <= bottom
    }
}

/// An 8-bit-per-channel color.
///
/// This is the one canonical range used across the crate. Native text colors
/// arrive as 16-bit channels and are narrowed with [`Color::from_native16`];
/// fill colors are widened to cairo's unit range with [`Color::to_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert 16-bit native channels (0-65535) to an opaque 8-bit color.
    pub fn from_native16(red: u16, green: u16, blue: u16) -> Self {
        Self::rgb(narrow(red), narrow(green), narrow(blue))
    }

    /// Channels as `(r, g, b, a)` in the 0.0-1.0 range.
    pub fn to_unit(&self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a) / 255.0,
        )
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Round a 16-bit channel to the nearest 8-bit value.
fn narrow(v: u16) -> u8 {
    ((u32::from(v) * 255 + 32767) / 65535) as u8
}

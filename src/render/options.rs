//! Rasterization options.

use crate::model::Color;

/// Options for rendering a page to a bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Background painted under the page content
    pub fill_color: Color,

    /// Disable anti-aliasing for all drawing
    pub no_antialias: bool,

    /// Scale applied to the page size in points to get pixels
    pub scale: f64,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Enable or disable anti-aliasing.
    pub fn with_antialias(mut self, enabled: bool) -> Self {
        self.no_antialias = !enabled;
        self
    }

    /// Disable anti-aliasing.
    pub fn without_antialias(self) -> Self {
        self.with_antialias(false)
    }

    /// Set the scale factor (1.0 = one pixel per point).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the scale from a target resolution in dots per inch.
    pub fn with_dpi(self, dpi: f64) -> Self {
        self.with_scale(dpi / 72.0)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            no_antialias: false,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.fill_color, Color::WHITE);
        assert!(!options.no_antialias);
        assert_eq!(options.scale, 1.0);
    }

    #[test]
    fn test_builder_chained() {
        let options = RenderOptions::new()
            .with_fill_color(Color::BLACK)
            .without_antialias()
            .with_dpi(144.0);
        assert_eq!(options.fill_color, Color::BLACK);
        assert!(options.no_antialias);
        assert_eq!(options.scale, 2.0);

        assert!(!options.with_antialias(true).no_antialias);
    }
}

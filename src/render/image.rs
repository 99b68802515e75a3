//! Decoded raster output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Color;

/// An RGBA8 bitmap: row-major, four bytes per pixel, no row padding.
///
/// Owns its pixels; nothing here refers to native memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RenderedImage {
    /// Wrap a packed RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::Other(format!(
                "RGBA buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image filled with one color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let data = color
            .to_array()
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The packed RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Take the packed RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (x, y) as `[r, g, b, a]`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Check if every pixel equals `color`.
    pub fn is_uniform(&self, color: Color) -> bool {
        let expected = color.to_array();
        self.data.chunks_exact(4).all(|px| px == expected)
    }

    /// Encode as PNG into a writer.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.data)?;
        png_writer.finish()?;
        Ok(())
    }

    /// Encode as PNG into memory.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_png(&mut out)?;
        Ok(out)
    }

    /// Save as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_png(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let img = RenderedImage::filled(3, 2, Color::WHITE);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.as_rgba().len(), 24);
        assert!(img.is_uniform(Color::WHITE));
        assert!(!img.is_uniform(Color::BLACK));
    }

    #[test]
    fn test_pixel_addressing() {
        let mut data = vec![0u8; 2 * 2 * 4];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]); // (1, 1)
        let img = RenderedImage::from_rgba(2, 2, data).unwrap();
        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 0, 0]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RenderedImage::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn test_png_signature() {
        let img = RenderedImage::filled(4, 4, Color::rgb(10, 20, 30));
        let bytes = img.to_png_bytes().unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        RenderedImage::filled(8, 5, Color::BLACK)
            .save_png(&path)
            .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}

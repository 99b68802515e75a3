//! Conversion of native structures into crate value types.
//!
//! Functions here read native memory but never free it; ownership stays with
//! the guards in [`crate::guard`].

use crate::ffi::{
    gboolean, PopplerColor, PopplerImageMapping, PopplerRectangle, PopplerTextAttributes,
};
use crate::guard::{borrowed_string, NativeList};
use crate::model::{Color, Image, Rectangle, TextAttributes};

/// Native boolean to `bool` (any non-zero value is true).
pub fn bool_from_native(value: gboolean) -> bool {
    value != 0
}

impl From<&PopplerRectangle> for Rectangle {
    fn from(r: &PopplerRectangle) -> Self {
        Rectangle::new(r.x1, r.y1, r.x2, r.y2)
    }
}

impl From<&PopplerColor> for Color {
    fn from(c: &PopplerColor) -> Self {
        Color::from_native16(c.red, c.green, c.blue)
    }
}

/// Copy one native attribute run.
///
/// Returns `None` for runs with a negative or inverted index range; such a
/// run can never cover a character.
///
/// # Safety
///
/// `raw.font_name` must be null or a valid NUL-terminated string.
pub unsafe fn text_attributes_from_raw(raw: &PopplerTextAttributes) -> Option<TextAttributes> {
    if raw.start_index < 0 || raw.end_index < raw.start_index {
        log::warn!(
            "dropping text run with invalid range {}..={}",
            raw.start_index,
            raw.end_index
        );
        return None;
    }

    Some(TextAttributes {
        font_name: borrowed_string(raw.font_name).unwrap_or_default(),
        font_size: raw.font_size,
        is_underlined: bool_from_native(raw.is_underlined),
        start_index: raw.start_index as usize,
        end_index: raw.end_index as usize,
        color: Color::from(&raw.color),
    })
}

/// Copy every run of a `PopplerTextAttributes` list, in native order.
///
/// # Safety
///
/// Every payload of `list` must be a valid `PopplerTextAttributes`.
pub unsafe fn text_attributes(list: &NativeList) -> Vec<TextAttributes> {
    list.iter::<PopplerTextAttributes>()
        .filter_map(|raw| text_attributes_from_raw(raw))
        .collect()
}

/// Copy every entry of a `PopplerImageMapping` list, in native order.
///
/// # Safety
///
/// Every payload of `list` must be a valid `PopplerImageMapping`.
pub unsafe fn images(list: &NativeList, document: u64, page_index: usize) -> Vec<Image> {
    list.iter::<PopplerImageMapping>()
        .map(|m| {
            Image::new(m.image_id, Rectangle::from(&m.area), page_index).with_document(document)
        })
        .collect()
}

/// Copy a native rectangle array.
pub fn rectangles(raw: &[PopplerRectangle]) -> Vec<Rectangle> {
    raw.iter().map(Rectangle::from).collect()
}

/// Byte layout of a native image surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
    /// 32-bit native-endian words, premultiplied alpha in the high byte
    Argb32,
    /// 32-bit native-endian words, high byte unused
    Rgb24,
}

/// Convert a native 32-bit surface into tightly packed, straight-alpha RGBA8.
///
/// Each pixel is read as a native-endian `u32` (`0xAARRGGBB`), so on
/// little-endian hosts the byte order in memory is B, G, R, A. Rows are
/// `stride` bytes apart; any padding is dropped.
///
/// Returns `None` if `data` is too short for the given geometry.
pub fn surface_to_rgba(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    format: SurfaceFormat,
) -> Option<Vec<u8>> {
    let row_bytes = width.checked_mul(4)?;
    if height > 0 && (stride < row_bytes || data.len() < stride * (height - 1) + row_bytes) {
        return None;
    }

    let mut rgba = Vec::with_capacity(row_bytes * height);
    for y in 0..height {
        let row = &data[y * stride..y * stride + row_bytes];
        for px in row.chunks_exact(4) {
            let word = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            let a = match format {
                SurfaceFormat::Argb32 => (word >> 24) as u8,
                SurfaceFormat::Rgb24 => 255,
            };
            let r = (word >> 16) as u8;
            let g = (word >> 8) as u8;
            let b = word as u8;
            rgba.extend_from_slice(&[
                unpremultiply(r, a),
                unpremultiply(g, a),
                unpremultiply(b, a),
                a,
            ]);
        }
    }
    Some(rgba)
}

fn unpremultiply(c: u8, a: u8) -> u8 {
    match a {
        0 => 0,
        255 => c,
        _ => ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8,
    }
}

//! Text run and positioned character types.

use super::{Color, Rectangle};
use serde::{Deserialize, Serialize};

/// One styled run of page text.
///
/// `start_index` and `end_index` are character offsets into the page text,
/// both inclusive, with `start_index <= end_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttributes {
    /// Font name as reported by the native library
    pub font_name: String,

    /// Font size in points
    pub font_size: f64,

    /// Whether the run is underlined
    pub is_underlined: bool,

    /// First character covered (inclusive)
    pub start_index: usize,

    /// Last character covered (inclusive)
    pub end_index: usize,

    /// Text color
    pub color: Color,
}

impl TextAttributes {
    /// Create a run covering `start..=end`. The bounds are reordered if given backwards.
    pub fn new(font_name: impl Into<String>, font_size: f64, start: usize, end: usize) -> Self {
        Self {
            font_name: font_name.into(),
            font_size,
            is_underlined: false,
            start_index: start.min(end),
            end_index: start.max(end),
            color: Color::BLACK,
        }
    }

    /// Set the underline flag.
    pub fn with_underline(mut self, underlined: bool) -> Self {
        self.is_underlined = underlined;
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Check if the run covers character `index` (closed interval).
    pub fn covers(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }

    /// Number of characters covered; 0 for a reversed run.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end_index - self.start_index + 1
        }
    }

    /// Check if the run covers nothing (bounds reversed).
    pub fn is_empty(&self) -> bool {
        self.end_index < self.start_index
    }
}

/// One character of page text with its resolved style and box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEl {
    /// The character
    pub text: char,

    /// Index of the covering run in [`TextLayoutAndAttrs::attributes`], if any
    pub attrs: Option<usize>,

    /// Bounding box from the per-character layout
    pub rect: Rectangle,
}

/// Positioned, styled characters together with the runs they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLayoutAndAttrs {
    /// Attribute runs in native order
    pub attributes: Vec<TextAttributes>,

    /// One element per character of the page text, in text order
    pub elements: Vec<TextEl>,
}

impl TextLayoutAndAttrs {
    /// Resolve the run referenced by an element.
    pub fn attributes_of(&self, el: &TextEl) -> Option<&TextAttributes> {
        el.attrs.and_then(|i| self.attributes.get(i))
    }

    /// Iterate elements paired with their resolved run.
    pub fn iter(&self) -> impl Iterator<Item = (&TextEl, Option<&TextAttributes>)> + '_ {
        self.elements.iter().map(|el| (el, self.attributes_of(el)))
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if there are no characters.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Reassemble the page text.
    pub fn text(&self) -> String {
        self.elements.iter().map(|el| el.text).collect()
    }
}

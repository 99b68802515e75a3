//! Page operations trait.
//!
//! Isolates the concrete native library from everything built on top of a
//! page: fusion, export and the tests all work against [`PageBackend`].

use crate::error::Result;
use crate::export::PageContent;
use crate::layout::{self, FusionStrategy};
use crate::model::{Image, Rectangle, TextAttributes, TextLayoutAndAttrs};
use crate::render::{RenderOptions, RenderedImage};

/// Read access to one page of a document.
///
/// Every method allocates whatever native resources it needs and releases
/// them before returning; only plain values cross this interface.
pub trait PageBackend {
    /// Full plain text of the page, as decoded by the native library.
    fn text(&self) -> String;

    /// Styled text runs in native order. Empty when the page has no text.
    fn text_attributes(&self) -> Vec<TextAttributes>;

    /// One bounding box per character of [`text`](Self::text), or `None`
    /// when the native library cannot provide a layout.
    fn text_layout(&self) -> Option<Vec<Rectangle>>;

    /// Page size in points.
    fn size(&self) -> (f64, f64);

    /// Page index within the document (0-based).
    fn index(&self) -> usize;

    /// Page label (e.g. "iv"), if the document defines one.
    fn label(&self) -> Option<String>;

    /// Presentation duration in seconds, if set.
    fn duration(&self) -> Option<f64>;

    /// Embedded raster images in native order.
    fn images(&self) -> Vec<Image>;

    /// Rasterize the page.
    fn render(&self, options: &RenderOptions) -> Result<RenderedImage>;

    /// Decode the pixels of an image enumerated from this page.
    fn image_data(&self, image: &Image) -> Result<RenderedImage>;

    /// Page size truncated to whole points.
    ///
    /// Lossy: use [`size`](Self::size) for anything that scales.
    fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.size();
        (w as u32, h as u32)
    }

    /// Positioned, styled characters using the default strategy.
    fn text_layout_and_attrs(&self) -> Result<TextLayoutAndAttrs> {
        self.text_layout_and_attrs_with(FusionStrategy::default())
    }

    /// Positioned, styled characters using a given run lookup strategy.
    ///
    /// An unavailable layout counts as zero boxes, so it only succeeds for a
    /// page without text.
    fn text_layout_and_attrs_with(&self, strategy: FusionStrategy) -> Result<TextLayoutAndAttrs> {
        let text = self.text();
        let attributes = self.text_attributes();
        let boxes = self.text_layout().unwrap_or_default();
        layout::fuse(&text, attributes, &boxes, strategy)
    }

    /// Collect everything extractable from the page.
    fn content(&self) -> Result<PageContent> {
        let (width, height) = self.size();
        let fused = self.text_layout_and_attrs()?;
        Ok(PageContent {
            index: self.index(),
            label: self.label(),
            width,
            height,
            duration: self.duration(),
            text: fused.text(),
            attributes: fused.attributes,
            elements: fused.elements,
            images: self.images(),
        })
    }
}

//! # poppler-page
//!
//! Safe, scoped access to the page-level API of poppler-glib.
//!
//! A page yields its plain text, styled text runs, one bounding box per
//! character, its size, label, presentation duration and embedded images,
//! and can be rasterized through cairo into an RGBA bitmap. Every native
//! allocation is owned by a guard and released exactly once before the call
//! that made it returns.
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "poppler")]
//! # fn main() -> poppler_page::Result<()> {
//! use poppler_page::poppler::Document;
//! use poppler_page::{PageBackend, RenderOptions};
//!
//! let doc = Document::open("document.pdf")?;
//! let page = doc.page(0)?;
//!
//! // Positioned, styled characters
//! let fused = page.text_layout_and_attrs()?;
//! for (el, attrs) in fused.iter() {
//!     let font = attrs.map(|a| a.font_name.as_str()).unwrap_or("-");
//!     println!("{:?} at {:?} in {}", el.text, el.rect, font);
//! }
//!
//! // 150 dpi bitmap
//! let image = page.render(&RenderOptions::new().with_dpi(150.0))?;
//! image.save_png("page-1.png")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "poppler"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//!
//! - **`poppler`**: links poppler-glib and cairo (found with `pkg-config`) and
//!   provides [`poppler::Document`] and [`poppler::Page`]
//! - Without it, the value types, marshaling, fusion and render planning are
//!   all available and testable against the [`PageBackend`] trait
//! - **Parallel processing**: several documents at once with Rayon
//! - **JSON export** of page content via serde

pub mod backend;
pub mod detect;
pub mod error;
pub mod export;
pub mod ffi;
pub mod guard;
pub mod layout;
pub mod marshal;
pub mod model;
pub mod render;
pub mod worker;

#[cfg(feature = "poppler")]
pub mod poppler;

// Re-export commonly used types
pub use backend::PageBackend;
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use export::{JsonFormat, PageContent};
pub use layout::{fuse, FusionStrategy};
pub use model::{Color, Image, Rectangle, TextAttributes, TextEl, TextLayoutAndAttrs};
pub use render::{RenderOptions, RenderPlan, RenderedImage};
pub use worker::run_with_deadline;

#[cfg(feature = "poppler")]
pub use poppler::{Document, OpenOptions, Page};

#[cfg(feature = "poppler")]
use std::path::Path;

/// Extract the content of every page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use poppler_page::extract_content;
///
/// for page in extract_content("document.pdf").unwrap() {
///     println!("{}: {}", page.index, page.text);
/// }
/// ```
#[cfg(feature = "poppler")]
pub fn extract_content<P: AsRef<Path>>(path: P) -> Result<Vec<PageContent>> {
    let doc = Document::open(path)?;
    doc.pages().map(|page| page?.content()).collect()
}

/// Convert the content of one page to JSON.
///
/// # Example
///
/// ```no_run
/// use poppler_page::{page_to_json, JsonFormat};
///
/// let json = page_to_json("document.pdf", 0, JsonFormat::Pretty).unwrap();
/// std::fs::write("page-1.json", json).unwrap();
/// ```
#[cfg(feature = "poppler")]
pub fn page_to_json<P: AsRef<Path>>(path: P, index: usize, format: JsonFormat) -> Result<String> {
    let doc = Document::open(path)?;
    let content = doc.page(index)?.content()?;
    export::to_json(&content, format)
}

/// Render one page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use poppler_page::{render_page, RenderOptions};
///
/// let image = render_page("document.pdf", 0, &RenderOptions::new().with_scale(2.0)).unwrap();
/// image.save_png("page-1@2x.png").unwrap();
/// ```
#[cfg(feature = "poppler")]
pub fn render_page<P: AsRef<Path>>(
    path: P,
    index: usize,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    let doc = Document::open(path)?;
    doc.page(index)?.render(options)
}

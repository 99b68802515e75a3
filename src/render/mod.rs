//! Rasterization of pages into RGBA bitmaps.
//!
//! The native drawing itself happens in the poppler backend; this module owns
//! the options, the pixel geometry and the decoded output type.

mod image;
mod options;
mod plan;

pub use image::RenderedImage;
pub use options::RenderOptions;
pub use plan::{RenderPlan, MAX_DIMENSION};

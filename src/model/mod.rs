//! Plain value types produced by the binding layer.
//!
//! Nothing in this module refers to native memory: every value is copied out
//! of the native structures before the call that produced it returns.

mod geometry;
mod image;
mod text;

pub use geometry::{Color, Rectangle};
pub use image::Image;
pub use text::{TextAttributes, TextEl, TextLayoutAndAttrs};

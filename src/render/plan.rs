//! Pixel geometry for a render call.

use super::RenderOptions;
use crate::error::{Error, Result};

/// Largest edge cairo accepts for an image surface.
pub const MAX_DIMENSION: u32 = 32767;

/// Target pixel size and the transform from page points to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Horizontal points-to-pixels factor
    pub scale_x: f64,
    /// Vertical points-to-pixels factor
    pub scale_y: f64,
}

impl RenderPlan {
    /// Size a surface for a page of `page_width` x `page_height` points.
    ///
    /// The page size is floored to whole points, multiplied by the scale and
    /// floored again. The transform is derived from the allocated pixel size
    /// divided by the exact page size, so both axes map the page onto the
    /// whole surface.
    pub fn new(page_width: f64, page_height: f64, options: &RenderOptions) -> Result<Self> {
        let scale = options.scale;
        let invalid = |width: i64, height: i64| Error::InvalidDimensions {
            width,
            height,
            scale,
        };

        if !scale.is_finite() || scale <= 0.0 || !page_width.is_finite() || !page_height.is_finite()
        {
            return Err(invalid(0, 0));
        }

        let width = (page_width.floor() * scale).floor();
        let height = (page_height.floor() * scale).floor();
        if width < 1.0 || height < 1.0 || page_width <= 0.0 || page_height <= 0.0 {
            return Err(invalid(width as i64, height as i64));
        }
        if width > f64::from(MAX_DIMENSION) || height > f64::from(MAX_DIMENSION) {
            return Err(invalid(width as i64, height as i64));
        }

        let plan = Self {
            width: width as u32,
            height: height as u32,
            scale_x: width / page_width,
            scale_y: height / page_height,
        };
        log::debug!(
            "render plan {}x{} px for {:.2}x{:.2} pt page (scale {})",
            plan.width,
            plan.height,
            page_width,
            page_height,
            scale
        );
        Ok(plan)
    }
}

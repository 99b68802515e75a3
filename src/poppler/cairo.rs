//! Owned cairo surfaces and drawing contexts.

use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::ffi;
use crate::guard::borrowed_string;
use crate::marshal::{self, SurfaceFormat};
use crate::model::Color;
use crate::render::{RenderOptions, RenderPlan, RenderedImage};

fn status_message(status: ffi::cairo_status_t) -> String {
    unsafe { borrowed_string(ffi::cairo_status_to_string(status)) }
        .unwrap_or_else(|| format!("cairo status {}", status))
}

/// An image surface, destroyed on drop.
pub(crate) struct Surface {
    raw: NonNull<ffi::cairo_surface_t>,
}

impl Surface {
    /// Allocate a zeroed ARGB32 surface.
    pub(crate) fn new_argb32(width: u32, height: u32) -> Result<Self> {
        let (w, h) = match (c_int::try_from(width), c_int::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(Error::Allocation(format!(
                    "surface size {}x{} out of range",
                    width, height
                )))
            }
        };
        let raw = unsafe { ffi::cairo_image_surface_create(ffi::CAIRO_FORMAT_ARGB32, w, h) };
        let surface = unsafe { Self::from_raw(raw) }
            .ok_or_else(|| Error::Allocation("cairo_image_surface_create returned null".into()))?;
        surface.check()?;
        Ok(surface)
    }

    /// Take ownership of a surface reference.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a surface reference nothing else destroys.
    pub(crate) unsafe fn from_raw(raw: *mut ffi::cairo_surface_t) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    fn as_ptr(&self) -> *mut ffi::cairo_surface_t {
        self.raw.as_ptr()
    }

    fn check(&self) -> Result<()> {
        let status = unsafe { ffi::cairo_surface_status(self.as_ptr()) };
        if status == ffi::CAIRO_STATUS_SUCCESS {
            Ok(())
        } else {
            Err(Error::Allocation(status_message(status)))
        }
    }

    /// Flush pending drawing and copy the pixels out as straight-alpha RGBA8.
    pub(crate) fn to_rgba(&self) -> Result<RenderedImage> {
        self.check()?;
        let raw = self.as_ptr();
        unsafe { ffi::cairo_surface_flush(raw) };

        let format = match unsafe { ffi::cairo_image_surface_get_format(raw) } {
            ffi::CAIRO_FORMAT_ARGB32 => SurfaceFormat::Argb32,
            ffi::CAIRO_FORMAT_RGB24 => SurfaceFormat::Rgb24,
            other => return Err(Error::Other(format!("unsupported surface format {}", other))),
        };
        let (width, height, stride) = unsafe {
            (
                ffi::cairo_image_surface_get_width(raw),
                ffi::cairo_image_surface_get_height(raw),
                ffi::cairo_image_surface_get_stride(raw),
            )
        };
        let (width, height, stride) = match (
            usize::try_from(width),
            usize::try_from(height),
            usize::try_from(stride),
        ) {
            (Ok(w), Ok(h), Ok(s)) => (w, h, s),
            _ => return Err(Error::Other("surface reports negative geometry".into())),
        };

        let data = unsafe { ffi::cairo_image_surface_get_data(raw) };
        if data.is_null() {
            return Err(Error::Allocation("surface has no pixel data".into()));
        }
        // SAFETY: an image surface owns stride * height bytes at `data`.
        let bytes = unsafe { std::slice::from_raw_parts(data, stride * height) };
        let rgba = marshal::surface_to_rgba(bytes, width, height, stride, format)
            .ok_or_else(|| Error::Other("surface buffer shorter than its geometry".into()))?;
        RenderedImage::from_rgba(width as u32, height as u32, rgba)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe { ffi::cairo_surface_destroy(self.as_ptr()) };
    }
}

/// A drawing context on a [`Surface`], destroyed on drop.
pub(crate) struct Context<'s> {
    raw: NonNull<ffi::cairo_t>,
    _surface: PhantomData<&'s Surface>,
}

impl<'s> Context<'s> {
    pub(crate) fn new(surface: &'s Surface) -> Result<Self> {
        let raw = unsafe { ffi::cairo_create(surface.as_ptr()) };
        let raw = NonNull::new(raw)
            .ok_or_else(|| Error::Allocation("cairo_create returned null".into()))?;
        let cr = Self {
            raw,
            _surface: PhantomData,
        };
        cr.check()?;
        Ok(cr)
    }

    pub(crate) fn as_ptr(&self) -> *mut ffi::cairo_t {
        self.raw.as_ptr()
    }

    pub(crate) fn check(&self) -> Result<()> {
        let status = unsafe { ffi::cairo_status(self.as_ptr()) };
        if status == ffi::CAIRO_STATUS_SUCCESS {
            Ok(())
        } else {
            Err(Error::Allocation(status_message(status)))
        }
    }

    pub(crate) fn scale(&self, sx: f64, sy: f64) {
        unsafe { ffi::cairo_scale(self.as_ptr(), sx, sy) };
    }

    /// Fill a rectangle in user space with a solid color.
    pub(crate) fn fill_rect(&self, width: f64, height: f64, color: Color) {
        let (r, g, b, a) = color.to_unit();
        unsafe {
            ffi::cairo_set_source_rgba(self.as_ptr(), r, g, b, a);
            ffi::cairo_rectangle(self.as_ptr(), 0.0, 0.0, width, height);
            ffi::cairo_fill(self.as_ptr());
        }
    }

    pub(crate) fn disable_antialias(&self) {
        unsafe { ffi::cairo_set_antialias(self.as_ptr(), ffi::CAIRO_ANTIALIAS_NONE) };
    }
}

impl Drop for Context<'_> {
    fn drop(&mut self) {
        unsafe { ffi::cairo_destroy(self.as_ptr()) };
    }
}

/// Allocate a surface sized by `plan` and prepare a scaled, filled context.
///
/// The closure draws into the context; the context is released before the
/// pixels are read back.
pub(crate) fn rasterize<F>(
    plan: &RenderPlan,
    page_size: (f64, f64),
    options: &RenderOptions,
    draw: F,
) -> Result<RenderedImage>
where
    F: FnOnce(&Context<'_>),
{
    let surface = Surface::new_argb32(plan.width, plan.height)?;
    {
        let cr = Context::new(&surface)?;
        cr.scale(plan.scale_x, plan.scale_y);
        cr.fill_rect(page_size.0, page_size.1, options.fill_color);
        if options.no_antialias {
            cr.disable_antialias();
        }
        draw(&cr);
        cr.check()?;
    }
    surface.to_rgba()
}

//! Native page handle and its [`PageBackend`] implementation.

use std::os::raw::c_uint;
use std::ptr::{self, NonNull};
use std::sync::Arc;

use super::cairo::{self, Surface};
use super::document::DocumentInner;
use super::{free_image_mapping, free_rectangles, free_string, free_text_attributes};
use crate::backend::PageBackend;
use crate::error::{Error, Result};
use crate::ffi;
use crate::guard::{NativeArray, NativeList, NativeString};
use crate::marshal;
use crate::model::{Image, Rectangle, TextAttributes};
use crate::render::{RenderOptions, RenderPlan, RenderedImage};

/// A page of an open [`Document`](super::Document).
///
/// Keeps the document alive. Methods take the document lock for the
/// duration of each native call sequence.
pub struct Page {
    raw: NonNull<ffi::PopplerPage>,
    doc: Arc<DocumentInner>,
    index: usize,
}

// SAFETY: every use of `raw` happens under the document lock.
unsafe impl Send for Page {}
unsafe impl Sync for Page {}

impl Page {
    pub(crate) fn new(raw: NonNull<ffi::PopplerPage>, doc: Arc<DocumentInner>, index: usize) -> Self {
        Self { raw, doc, index }
    }

    fn as_ptr(&self) -> *mut ffi::PopplerPage {
        self.raw.as_ptr()
    }

    /// Page size; the caller holds the lock.
    fn size_locked(&self) -> (f64, f64) {
        let (mut width, mut height) = (0.0, 0.0);
        unsafe { ffi::poppler_page_get_size(self.as_ptr(), &mut width, &mut height) };
        (width, height)
    }
}

impl PageBackend for Page {
    fn text(&self) -> String {
        let _lock = self.doc.lock();
        let text = unsafe { NativeString::new(ffi::poppler_page_get_text(self.as_ptr()), free_string) };
        text.to_string_lossy().unwrap_or_default()
    }

    fn text_attributes(&self) -> Vec<TextAttributes> {
        let _lock = self.doc.lock();
        let list = unsafe {
            NativeList::new(
                ffi::poppler_page_get_text_attributes(self.as_ptr()),
                free_text_attributes,
            )
        };
        unsafe { marshal::text_attributes(&list) }
    }

    fn text_layout(&self) -> Option<Vec<Rectangle>> {
        let _lock = self.doc.lock();
        let mut rects: *mut ffi::PopplerRectangle = ptr::null_mut();
        let mut count: c_uint = 0;
        let ok = unsafe { ffi::poppler_page_get_text_layout(self.as_ptr(), &mut rects, &mut count) };
        let array = unsafe { NativeArray::new(rects, count as usize, free_rectangles) };
        if !marshal::bool_from_native(ok) {
            log::debug!("page {} has no text layout", self.index);
            return None;
        }
        Some(marshal::rectangles(array.as_slice()))
    }

    fn size(&self) -> (f64, f64) {
        let _lock = self.doc.lock();
        self.size_locked()
    }

    fn index(&self) -> usize {
        let _lock = self.doc.lock();
        let native = unsafe { ffi::poppler_page_get_index(self.as_ptr()) };
        usize::try_from(native).unwrap_or(self.index)
    }

    fn label(&self) -> Option<String> {
        let _lock = self.doc.lock();
        let label = unsafe { NativeString::new(ffi::poppler_page_get_label(self.as_ptr()), free_string) };
        label.to_string_lossy().filter(|l| !l.is_empty())
    }

    fn duration(&self) -> Option<f64> {
        let _lock = self.doc.lock();
        let duration = unsafe { ffi::poppler_page_get_duration(self.as_ptr()) };
        (duration >= 0.0).then_some(duration)
    }

    fn images(&self) -> Vec<Image> {
        let _lock = self.doc.lock();
        let list = unsafe {
            NativeList::new(
                ffi::poppler_page_get_image_mapping(self.as_ptr()),
                free_image_mapping,
            )
        };
        unsafe { marshal::images(&list, self.doc.id(), self.index) }
    }

    fn render(&self, options: &RenderOptions) -> Result<RenderedImage> {
        let _lock = self.doc.lock();
        let page_size = self.size_locked();
        let plan = RenderPlan::new(page_size.0, page_size.1, options)?;
        cairo::rasterize(&plan, page_size, options, |cr| unsafe {
            ffi::poppler_page_render_for_printing(self.as_ptr(), cr.as_ptr());
        })
    }

    fn image_data(&self, image: &Image) -> Result<RenderedImage> {
        image.check_owner(self.doc.id(), self.index)?;

        let _lock = self.doc.lock();
        let raw = unsafe { ffi::poppler_page_get_image(self.as_ptr(), image.id) };
        let surface = unsafe { Surface::from_raw(raw) }.ok_or(Error::ImageUnavailable(image.id))?;
        surface.to_rgba()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        let _lock = self.doc.lock();
        unsafe { ffi::g_object_unref(self.as_ptr().cast()) };
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("index", &self.index).finish()
    }
}

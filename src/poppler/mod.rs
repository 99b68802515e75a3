//! Concrete binding to poppler-glib and cairo.
//!
//! Compiled with the `poppler` feature. A [`Document`] owns the native
//! document handle; every [`Page`] it hands out shares that handle through an
//! `Arc`, and every native call on either runs under the document's lock.

mod cairo;
mod document;
mod page;

pub use document::{Document, OpenOptions, Pages};
pub use page::Page;

use std::os::raw::c_char;
use std::path::Path;
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::backend::PageBackend;
use crate::error::Result;
use crate::export::PageContent;
use crate::ffi;
use crate::guard::borrowed_string;

/// Version string of the linked poppler library (e.g. "24.02.0").
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        // The returned string is static in the library.
        let version = unsafe { borrowed_string(ffi::poppler_get_version()) }.unwrap_or_default();
        log::debug!("linked poppler {}", version);
        version
    })
}

/// Extract the content of every page of several documents in parallel.
///
/// Documents are processed on the rayon pool; pages of one document are
/// read one after another. Results are returned in input order.
pub fn extract_files<P>(paths: &[P], options: &OpenOptions) -> Vec<Result<Vec<PageContent>>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| extract_file(path.as_ref(), options))
        .collect()
}

fn extract_file(path: &Path, options: &OpenOptions) -> Result<Vec<PageContent>> {
    let doc = Document::open_with_options(path, options)?;
    log::debug!("extracting {} pages from {}", doc.page_count(), path.display());
    doc.pages().map(|page| page?.content()).collect()
}

// Release functions for the guards. glib allocations are freed with g_free;
// lists come with their own poppler free function.

unsafe fn free_string(ptr: *mut c_char) {
    ffi::g_free(ptr.cast());
}

unsafe fn free_rectangles(ptr: *mut ffi::PopplerRectangle) {
    ffi::g_free(ptr.cast());
}

unsafe fn free_text_attributes(list: *mut ffi::GList) {
    ffi::poppler_page_free_text_attributes(list);
}

unsafe fn free_image_mapping(list: *mut ffi::GList) {
    ffi::poppler_page_free_image_mapping(list);
}

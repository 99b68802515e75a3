//! Raw declarations for the poppler-glib, glib and cairo C APIs.
//!
//! The `#[repr(C)]` structs are always available so the marshaling layer can
//! be exercised against Rust-built values. The `extern` blocks are only
//! compiled with the `poppler` feature, which also links the libraries.

#![allow(non_camel_case_types)]
#![allow(dead_code)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub type gboolean = c_int;
pub type gpointer = *mut c_void;
pub type GQuark = u32;

pub const GFALSE: gboolean = 0;
pub const GTRUE: gboolean = 1;

/// Doubly linked list node from glib.
#[repr(C)]
#[derive(Debug)]
pub struct GList {
    pub data: gpointer,
    pub next: *mut GList,
    pub prev: *mut GList,
}

#[repr(C)]
#[derive(Debug)]
pub struct GError {
    pub domain: GQuark,
    pub code: c_int,
    pub message: *mut c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PopplerRectangle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Channels are 16-bit (0-65535).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PopplerColor {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

#[repr(C)]
#[derive(Debug)]
pub struct PopplerTextAttributes {
    pub font_name: *mut c_char,
    pub font_size: f64,
    pub is_underlined: gboolean,
    pub color: PopplerColor,
    pub start_index: c_int,
    pub end_index: c_int,
}

#[repr(C)]
#[derive(Debug)]
pub struct PopplerImageMapping {
    pub area: PopplerRectangle,
    pub image_id: c_int,
}

#[repr(C)]
pub struct PopplerDocument {
    _private: [u8; 0],
}

#[repr(C)]
pub struct PopplerPage {
    _private: [u8; 0],
}

#[repr(C)]
pub struct cairo_surface_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct cairo_t {
    _private: [u8; 0],
}

pub type cairo_format_t = c_int;
pub type cairo_status_t = c_int;
pub type cairo_antialias_t = c_int;

pub const CAIRO_STATUS_SUCCESS: cairo_status_t = 0;
pub const CAIRO_FORMAT_INVALID: cairo_format_t = -1;
pub const CAIRO_FORMAT_ARGB32: cairo_format_t = 0;
pub const CAIRO_FORMAT_RGB24: cairo_format_t = 1;
pub const CAIRO_ANTIALIAS_DEFAULT: cairo_antialias_t = 0;
pub const CAIRO_ANTIALIAS_NONE: cairo_antialias_t = 1;

/// `PopplerError` codes in the poppler error domain.
pub const POPPLER_ERROR_INVALID: c_int = 0;
pub const POPPLER_ERROR_ENCRYPTED: c_int = 1;
pub const POPPLER_ERROR_OPEN_FILE: c_int = 2;
pub const POPPLER_ERROR_BAD_CATALOG: c_int = 3;
pub const POPPLER_ERROR_DAMAGED: c_int = 4;

#[cfg(feature = "poppler")]
extern "C" {
    // glib / gobject
    pub fn g_free(mem: gpointer);
    pub fn g_object_unref(object: gpointer);
    pub fn g_error_free(error: *mut GError);
    pub fn g_filename_to_uri(
        filename: *const c_char,
        hostname: *const c_char,
        error: *mut *mut GError,
    ) -> *mut c_char;

    // poppler document
    pub fn poppler_get_version() -> *const c_char;
    pub fn poppler_error_quark() -> GQuark;
    pub fn poppler_document_new_from_file(
        uri: *const c_char,
        password: *const c_char,
        error: *mut *mut GError,
    ) -> *mut PopplerDocument;
    pub fn poppler_document_new_from_data(
        data: *mut c_char,
        length: c_int,
        password: *const c_char,
        error: *mut *mut GError,
    ) -> *mut PopplerDocument;
    pub fn poppler_document_get_n_pages(document: *mut PopplerDocument) -> c_int;
    pub fn poppler_document_get_page(
        document: *mut PopplerDocument,
        index: c_int,
    ) -> *mut PopplerPage;

    // poppler page
    pub fn poppler_page_get_text(page: *mut PopplerPage) -> *mut c_char;
    pub fn poppler_page_get_text_attributes(page: *mut PopplerPage) -> *mut GList;
    pub fn poppler_page_free_text_attributes(list: *mut GList);
    pub fn poppler_page_get_text_layout(
        page: *mut PopplerPage,
        rectangles: *mut *mut PopplerRectangle,
        n_rectangles: *mut c_uint,
    ) -> gboolean;
    pub fn poppler_page_get_size(page: *mut PopplerPage, width: *mut f64, height: *mut f64);
    pub fn poppler_page_get_index(page: *mut PopplerPage) -> c_int;
    pub fn poppler_page_get_label(page: *mut PopplerPage) -> *mut c_char;
    pub fn poppler_page_get_duration(page: *mut PopplerPage) -> f64;
    pub fn poppler_page_get_image_mapping(page: *mut PopplerPage) -> *mut GList;
    pub fn poppler_page_free_image_mapping(list: *mut GList);
    pub fn poppler_page_get_image(page: *mut PopplerPage, image_id: c_int) -> *mut cairo_surface_t;
    pub fn poppler_page_render_for_printing(page: *mut PopplerPage, cairo: *mut cairo_t);

    // cairo
    pub fn cairo_image_surface_create(
        format: cairo_format_t,
        width: c_int,
        height: c_int,
    ) -> *mut cairo_surface_t;
    pub fn cairo_surface_status(surface: *mut cairo_surface_t) -> cairo_status_t;
    pub fn cairo_surface_flush(surface: *mut cairo_surface_t);
    pub fn cairo_surface_destroy(surface: *mut cairo_surface_t);
    pub fn cairo_image_surface_get_data(surface: *mut cairo_surface_t) -> *mut u8;
    pub fn cairo_image_surface_get_format(surface: *mut cairo_surface_t) -> cairo_format_t;
    pub fn cairo_image_surface_get_width(surface: *mut cairo_surface_t) -> c_int;
    pub fn cairo_image_surface_get_height(surface: *mut cairo_surface_t) -> c_int;
    pub fn cairo_image_surface_get_stride(surface: *mut cairo_surface_t) -> c_int;
    pub fn cairo_create(target: *mut cairo_surface_t) -> *mut cairo_t;
    pub fn cairo_status(cr: *mut cairo_t) -> cairo_status_t;
    pub fn cairo_destroy(cr: *mut cairo_t);
    pub fn cairo_scale(cr: *mut cairo_t, sx: f64, sy: f64);
    pub fn cairo_set_source_rgba(cr: *mut cairo_t, red: f64, green: f64, blue: f64, alpha: f64);
    pub fn cairo_rectangle(cr: *mut cairo_t, x: f64, y: f64, width: f64, height: f64);
    pub fn cairo_fill(cr: *mut cairo_t);
    pub fn cairo_set_antialias(cr: *mut cairo_t, antialias: cairo_antialias_t);
    pub fn cairo_status_to_string(status: cairo_status_t) -> *const c_char;
}

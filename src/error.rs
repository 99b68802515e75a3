//! Error types for poppler-page.

use std::io;
use thiserror::Error;

/// Result type alias for poppler-page operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while binding a native page.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The native library refused to open the document.
    #[error("Failed to open document: {0}")]
    Open(String),

    /// The document is encrypted and the password was missing or wrong.
    #[error("Invalid password")]
    InvalidPassword,

    /// Page index is out of range.
    #[error("Page {index} is out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page index (0-based)
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// The native library returned no page for a valid index.
    #[error("Failed to load page {0}")]
    PageLoad(usize),

    /// Native surface or drawing context creation failed.
    #[error("Native allocation failed: {0}")]
    Allocation(String),

    /// Requested raster dimensions cannot be allocated.
    #[error("Invalid raster dimensions {width}x{height} (scale {scale})")]
    InvalidDimensions {
        /// Target width in pixels
        width: i64,
        /// Target height in pixels
        height: i64,
        /// Scale factor that produced them
        scale: f64,
    },

    /// Text and per-character layout disagree in length.
    #[error("Text has {text_len} characters but layout has {layout_len} boxes")]
    IndexMismatch {
        /// Character count of the page text
        text_len: usize,
        /// Number of layout rectangles
        layout_len: usize,
    },

    /// An image descriptor was used with a page it does not belong to.
    #[error("Image {id} belongs to page {image_page}, not page {page}")]
    ForeignImage {
        /// Native image id
        id: i32,
        /// Page the descriptor was enumerated from
        image_page: usize,
        /// Page it was used with
        page: usize,
    },

    /// An image descriptor was used with a page of another document.
    #[error("Image {id} belongs to document {image_document}, not document {document}")]
    ForeignDocument {
        /// Native image id
        id: i32,
        /// Document the descriptor was enumerated from
        image_document: u64,
        /// Document it was used with
        document: u64,
    },

    /// The native library returned no pixels for an image.
    #[error("Image {0} has no pixel data")]
    ImageUnavailable(i32),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(String),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A deadline-bounded call did not finish in time.
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map a native error from the poppler domain to a crate error.
    ///
    /// Only `POPPLER_ERROR_ENCRYPTED` means a missing or wrong password;
    /// every other code, and every other domain, is an open failure.
    pub fn from_native(poppler_domain: bool, code: i32, message: String) -> Self {
        if poppler_domain && code == crate::ffi::POPPLER_ERROR_ENCRYPTED {
            Error::InvalidPassword
        } else {
            Error::Open(message)
        }
    }
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(e) => Error::Io(e),
            _ => Error::PngEncoding(err.to_string()),
        }
    }
}

//! Embedded image descriptors.

use super::Rectangle;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One embedded raster image on a page.
///
/// A descriptor only names the image; pixels are read separately through
/// [`PageBackend::image_data`](crate::PageBackend::image_data) on the page it
/// was enumerated from. The owner is identified by document id and page
/// index together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Native image identifier, unique within the page
    pub id: i32,

    /// Placement on the page
    pub area: Rectangle,

    /// Index of the owning page (0-based)
    pub page_index: usize,

    /// Identity of the owning document within this process
    pub document: u64,
}

impl Image {
    /// Create an image descriptor owned by document 0.
    pub fn new(id: i32, area: Rectangle, page_index: usize) -> Self {
        Self {
            id,
            area,
            page_index,
            document: 0,
        }
    }

    /// Set the owning document.
    pub fn with_document(mut self, document: u64) -> Self {
        self.document = document;
        self
    }

    /// Check if the descriptor was enumerated from page `index` of `document`.
    pub fn belongs_to(&self, document: u64, index: usize) -> bool {
        self.document == document && self.page_index == index
    }

    /// Fail unless the descriptor was enumerated from page `index` of `document`.
    pub fn check_owner(&self, document: u64, index: usize) -> Result<()> {
        if self.document != document {
            return Err(Error::ForeignDocument {
                id: self.id,
                image_document: self.document,
                document,
            });
        }
        if self.page_index != index {
            return Err(Error::ForeignImage {
                id: self.id,
                image_page: self.page_index,
                page: index,
            });
        }
        Ok(())
    }
}

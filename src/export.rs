//! JSON export of extracted page content.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Image, TextAttributes, TextEl};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Everything extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page index (0-based)
    pub index: usize,

    /// Page label, if defined
    pub label: Option<String>,

    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Presentation duration in seconds, if set
    pub duration: Option<f64>,

    /// Plain text
    pub text: String,

    /// Styled runs in native order
    pub attributes: Vec<TextAttributes>,

    /// One element per character; `attrs` indexes into `attributes`
    pub elements: Vec<TextEl>,

    /// Embedded images
    pub images: Vec<Image>,
}

/// Convert page content to JSON.
pub fn to_json(content: &PageContent, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(content)?,
        JsonFormat::Compact => serde_json::to_string(content)?,
    };
    Ok(json)
}

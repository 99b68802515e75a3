//! PDF header sniffing ahead of the native open.
//!
//! Poppler reports a non-PDF input only as a generic parse failure; checking
//! the header first gives callers [`Error::UnknownFormat`] instead.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Readers accept a header anywhere in the first 1024 bytes.
const HEADER_WINDOW: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// What the file header says about a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of `%PDF-` (non-zero when junk precedes it)
    pub offset: usize,
    /// Whether a linearization dictionary appears in the header window
    pub linearized: bool,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Sniff the header of a file on disk.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut head = Vec::with_capacity(HEADER_WINDOW);
    File::open(path)?
        .take(HEADER_WINDOW as u64)
        .read_to_end(&mut head)?;
    sniff_bytes(&head)
}

/// Sniff the header of an in-memory document.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = window
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).into_owned();
    if !is_valid_version(version_bytes) {
        return Err(Error::UnsupportedVersion(version));
    }

    let linearized = window
        .windows(b"/Linearized".len())
        .any(|w| w == b"/Linearized");

    Ok(PdfHeader {
        version,
        offset,
        linearized,
    })
}

/// Check if bytes start like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_bytes(data).is_ok()
}

fn is_valid_version(v: &[u8]) -> bool {
    matches!(v, [major, b'.', minor] if (b'1'..=b'2').contains(major) && minor.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_plain_header() {
        let header = sniff_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
        assert!(!header.linearized);
    }

    #[test]
    fn test_sniff_leading_junk() {
        let header = sniff_bytes(b"\xef\xbb\xbfjunk%PDF-2.0\n").unwrap();
        assert_eq!(header.version, "2.0");
        assert_eq!(header.offset, 7);
    }

    #[test]
    fn test_sniff_linearized() {
        let data = b"%PDF-1.5\n1 0 obj\n<< /Linearized 1 /L 1234 >>\nendobj\n";
        assert!(sniff_bytes(data).unwrap().linearized);
    }

    #[test]
    fn test_header_outside_window() {
        let mut data = vec![b' '; HEADER_WINDOW];
        data.extend_from_slice(b"%PDF-1.4\n");
        assert!(matches!(sniff_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_not_pdf() {
        assert!(matches!(
            sniff_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(sniff_bytes(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_bytes(b""), Err(Error::UnknownFormat)));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_bad_version() {
        assert!(matches!(
            sniff_bytes(b"%PDF-9.x\n"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_sniff_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();
        assert_eq!(sniff_path(&path).unwrap().version, "1.4");
    }
}

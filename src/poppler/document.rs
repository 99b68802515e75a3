//! Native document handle.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::page::Page;
use super::free_string;
use crate::detect::{self, PdfHeader};
use crate::error::{Error, Result};
use crate::ffi;
use crate::guard::{borrowed_string, NativeString};

/// Options for opening a document.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Password for encrypted documents
    pub password: Option<String>,
}

impl OpenOptions {
    /// Create default options (no password).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password used to decrypt the document.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    fn password_cstring(&self) -> Result<Option<CString>> {
        self.password
            .as_deref()
            .map(|pw| {
                CString::new(pw).map_err(|_| Error::Other("password contains a NUL byte".into()))
            })
            .transpose()
    }
}

/// Shared state of an open document.
///
/// Pages hold an `Arc` to this, so the native document is released only
/// after the last page.
pub(crate) struct DocumentInner {
    raw: NonNull<ffi::PopplerDocument>,
    /// Process-unique, never 0
    id: u64,
    lock: Mutex<()>,
    /// Backing bytes for documents opened from memory; poppler does not copy them.
    _data: Option<Vec<u8>>,
}

// SAFETY: all access to `raw` and to pages derived from it goes through `lock`.
unsafe impl Send for DocumentInner {}
unsafe impl Sync for DocumentInner {}

/// Source of document ids; 0 stays free for descriptors built by hand.
static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

impl DocumentInner {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Serialize native calls on this document and its pages.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        // A panic while locked leaves no Rust state behind worth protecting.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DocumentInner {
    fn drop(&mut self) {
        log::debug!("releasing native document");
        unsafe { ffi::g_object_unref(self.raw.as_ptr().cast()) };
    }
}

/// An open PDF document.
///
/// # Example
///
/// ```no_run
/// use poppler_page::poppler::Document;
/// use poppler_page::PageBackend;
///
/// let doc = Document::open("document.pdf")?;
/// for page in doc.pages() {
///     let page = page?;
///     println!("page {}: {} chars", page.index(), page.text().chars().count());
/// }
/// # Ok::<(), poppler_page::Error>(())
/// ```
pub struct Document {
    inner: Arc<DocumentInner>,
    header: PdfHeader,
}

impl Document {
    /// Open a document from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &OpenOptions::default())
    }

    /// Open an encrypted document from a file.
    pub fn open_with_password<P: AsRef<Path>>(path: P, password: &str) -> Result<Self> {
        Self::open_with_options(path, &OpenOptions::new().with_password(password))
    }

    /// Open a document from a file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let header = detect::sniff_path(path)?;
        let uri = file_uri(path)?;
        let password = options.password_cstring()?;

        let mut error: *mut ffi::GError = ptr::null_mut();
        let raw = unsafe {
            ffi::poppler_document_new_from_file(uri.as_ptr(), opt_ptr(&password), &mut error)
        };
        log::debug!("opened {} ({})", path.display(), header);
        Self::from_raw(raw, error, None, header)
    }

    /// Open a document held in memory. The bytes are kept alive by the document.
    pub fn from_bytes(data: impl Into<Vec<u8>>, password: Option<&str>) -> Result<Self> {
        let options = OpenOptions {
            password: password.map(str::to_string),
        };
        Self::from_bytes_with_options(data, &options)
    }

    /// Open a document held in memory with custom options.
    pub fn from_bytes_with_options(data: impl Into<Vec<u8>>, options: &OpenOptions) -> Result<Self> {
        let mut data = data.into();
        let header = detect::sniff_bytes(&data)?;
        let length = c_int::try_from(data.len())
            .map_err(|_| Error::Open(format!("document of {} bytes is too large", data.len())))?;
        let password = options.password_cstring()?;

        let mut error: *mut ffi::GError = ptr::null_mut();
        let raw = unsafe {
            ffi::poppler_document_new_from_data(
                data.as_mut_ptr().cast::<c_char>(),
                length,
                opt_ptr(&password),
                &mut error,
            )
        };
        log::debug!("opened {} byte in-memory document ({})", data.len(), header);
        Self::from_raw(raw, error, Some(data), header)
    }

    fn from_raw(
        raw: *mut ffi::PopplerDocument,
        error: *mut ffi::GError,
        data: Option<Vec<u8>>,
        header: PdfHeader,
    ) -> Result<Self> {
        match NonNull::new(raw) {
            Some(raw) => {
                if !error.is_null() {
                    unsafe { ffi::g_error_free(error) };
                }
                Ok(Self {
                    inner: Arc::new(DocumentInner {
                        raw,
                        id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
                        lock: Mutex::new(()),
                        _data: data,
                    }),
                    header,
                })
            }
            None => Err(unsafe { take_error(error) }),
        }
    }

    /// Process-unique identity, carried by the image descriptors of its pages.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Header information sniffed before opening.
    pub fn header(&self) -> &PdfHeader {
        &self.header
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        let _lock = self.inner.lock();
        let count = unsafe { ffi::poppler_document_get_n_pages(self.inner.raw.as_ptr()) };
        usize::try_from(count).unwrap_or(0)
    }

    /// Load the page at `index` (0-based).
    pub fn page(&self, index: usize) -> Result<Page> {
        let count = self.page_count();
        if index >= count {
            return Err(Error::PageOutOfRange { index, count });
        }

        let raw = {
            let _lock = self.inner.lock();
            // index < count, which itself came from a c_int
            unsafe { ffi::poppler_document_get_page(self.inner.raw.as_ptr(), index as c_int) }
        };
        let raw = NonNull::new(raw).ok_or(Error::PageLoad(index))?;
        Ok(Page::new(raw, Arc::clone(&self.inner), index))
    }

    /// Iterate over all pages in order.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            doc: self,
            next: 0,
            count: self.page_count(),
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.inner.id)
            .field("header", &self.header)
            .field("page_count", &self.page_count())
            .finish()
    }
}

/// Iterator over the pages of a [`Document`].
pub struct Pages<'a> {
    doc: &'a Document,
    next: usize,
    count: usize,
}

impl Iterator for Pages<'_> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let page = self.doc.page(self.next);
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pages<'_> {}

fn opt_ptr(s: &Option<CString>) -> *const c_char {
    s.as_ref().map_or(ptr::null(), |s| s.as_ptr())
}

/// Convert a path into the `file://` URI poppler opens.
fn file_uri(path: &Path) -> Result<NativeString> {
    let absolute = path.canonicalize()?;
    let filename = path_cstring(&absolute)?;

    let mut error: *mut ffi::GError = ptr::null_mut();
    let uri = unsafe {
        NativeString::new(
            ffi::g_filename_to_uri(filename.as_ptr(), ptr::null(), &mut error),
            free_string,
        )
    };
    if uri.as_ptr().is_null() {
        return Err(unsafe { take_error(error) });
    }
    Ok(uri)
}

#[cfg(unix)]
fn path_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Error::Open(format!("path contains a NUL byte: {}", path.display())))
}

#[cfg(not(unix))]
fn path_cstring(path: &Path) -> Result<CString> {
    let s = path
        .to_str()
        .ok_or_else(|| Error::Open(format!("path is not valid UTF-8: {}", path.display())))?;
    CString::new(s).map_err(|_| Error::Open(format!("path contains a NUL byte: {}", path.display())))
}

/// Convert a `GError` into a crate error and free it.
///
/// # Safety
///
/// `error` must be null or a `GError` nothing else frees.
unsafe fn take_error(error: *mut ffi::GError) -> Error {
    let Some(err) = error.as_ref() else {
        return Error::Open("unknown error".to_string());
    };
    let poppler_domain = err.domain == ffi::poppler_error_quark();
    let code = err.code;
    let message = borrowed_string(err.message).unwrap_or_default();
    ffi::g_error_free(error);

    Error::from_native(poppler_domain, code, message)
}

//! Top-level PDF document type for reading pages.

use pdfsplice_core::{OpenOptions, PageSource, Pages, PdfError, Select, Splice, select, splice};
use pdfsplice_parse::{LopdfBackend, LopdfDocument, PdfBackend};

use crate::Page;

/// A PDF document opened as a read-only page source.
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open_file("original.pdf", None)?;
/// for page in pdf.select(&[0, 2, 4])? {
///     println!("{}", page.extract_text()?);
/// }
/// ```
pub struct Pdf {
    doc: LopdfDocument,
}

impl Pdf {
    /// Open a PDF document from a file path.
    ///
    /// This is a convenience wrapper around [`Pdf::open`] that reads the file
    /// into memory first.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be read or is not a valid PDF.
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<OpenOptions>,
    ) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw PDF file bytes.
    /// * `options` - Resource limits. Uses defaults (no limits) if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PasswordRequired`] if the PDF is encrypted,
    /// [`PdfError::ResourceLimitExceeded`] if a limit in `options` is exceeded,
    /// and [`PdfError::ParseError`] if the bytes are not a valid PDF document.
    pub fn open(bytes: &[u8], options: Option<OpenOptions>) -> Result<Self, PdfError> {
        let options = options.unwrap_or_default();
        if let Some(max_bytes) = options.max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(PdfError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }

        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;

        let page_count = LopdfBackend::page_count(&doc);
        if let Some(max_pages) = options.max_pages {
            if page_count > max_pages {
                return Err(PdfError::ResourceLimitExceeded {
                    limit_name: "max_pages".to_string(),
                    limit_value: max_pages,
                    actual_value: page_count,
                });
            }
        }

        Ok(Self { doc })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// PDF version from the file header (e.g. "1.5").
    pub fn version(&self) -> &str {
        self.doc.version()
    }

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PageIndexOutOfRange`] if `index` is not below
    /// [`page_count`](Pdf::page_count).
    pub fn page(&self, index: usize) -> Result<Page<'_>, PdfError> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(PdfError::PageIndexOutOfRange { index, page_count });
        }
        Ok(Page::new(self, index))
    }

    /// Every page, lazily, in document order.
    pub fn pages(&self) -> Pages<&Pdf> {
        Pages::new(self)
    }

    /// Lazily select the pages at `indices`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::EmptyPageSelection`] or
    /// [`PdfError::PageIndexOutOfRange`] before any page is produced.
    pub fn select(&self, indices: &[usize]) -> Result<Select<&Pdf>, PdfError> {
        let selection = select(self, indices)?;
        tracing::debug!(
            document = self.doc.id(),
            selected = selection.len(),
            "selected pages"
        );
        Ok(selection)
    }

    /// Lazily replace the pages at `targets` with the pages of `replacement`.
    ///
    /// The n-th page of `replacement` lands on the n-th smallest target.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PageCountMismatch`], [`PdfError::PageIndexOutOfRange`],
    /// or [`PdfError::DuplicatePageIndex`] before any page is produced.
    pub fn splice<'a>(
        &'a self,
        replacement: &'a Pdf,
        targets: &[usize],
    ) -> Result<Splice<&'a Pdf, &'a Pdf>, PdfError> {
        let spliced = splice(self, replacement, targets)?;
        tracing::debug!(
            original = self.doc.id(),
            replacement = replacement.doc.id(),
            replaced = targets.len(),
            "spliced pages"
        );
        Ok(spliced)
    }

    pub(crate) fn document(&self) -> &LopdfDocument {
        &self.doc
    }
}

impl std::fmt::Debug for Pdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pdf").field("doc", &self.doc).finish()
    }
}

impl<'a> PageSource for &'a Pdf {
    type Page = Page<'a>;

    fn page_count(&self) -> usize {
        Pdf::page_count(*self)
    }

    fn page(&self, index: usize) -> Self::Page {
        Page::new(*self, index)
    }
}

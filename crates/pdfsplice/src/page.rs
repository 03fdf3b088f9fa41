//! Page handle borrowed from a [`Pdf`].

use pdfsplice_core::PdfError;
use pdfsplice_parse::{LopdfBackend, LopdfPage, PdfBackend};

use crate::Pdf;

/// A single page of an open [`Pdf`].
///
/// Cheap to copy. Two handles are equal when they name the same page of
/// the same open document.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    pdf: &'a Pdf,
    /// Page index (0-based).
    index: usize,
}

impl<'a> Page<'a> {
    pub(crate) fn new(pdf: &'a Pdf, index: usize) -> Self {
        Self { pdf, index }
    }

    /// Page index (0-based) within its source document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The document this page belongs to.
    pub fn pdf(&self) -> &'a Pdf {
        self.pdf
    }

    /// Extract the page text, one line per text line.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ParseError`] if the content stream cannot be decoded.
    pub fn extract_text(&self) -> Result<String, PdfError> {
        let page = self.backend_page()?;
        LopdfBackend::page_text(self.pdf.document(), &page).map_err(PdfError::from)
    }

    pub(crate) fn backend_page(&self) -> Result<LopdfPage, PdfError> {
        LopdfBackend::get_page(self.pdf.document(), self.index).map_err(PdfError::from)
    }
}

impl PartialEq for Page<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.pdf, other.pdf) && self.index == other.index
    }
}

impl Eq for Page<'_> {}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.pdf.document().id())
            .field("index", &self.index)
            .finish()
    }
}

//! Output document assembled from pages of open documents.

use std::io::{BufWriter, Write};
use std::path::Path;

use pdfsplice_core::{PageSink, PdfError, WriteOptions, build};
use pdfsplice_parse::{LopdfBackend, LopdfWriter, PdfBackend};

use crate::Page;

/// A new PDF document built page by page.
///
/// Pages may come from any number of open [`Pdf`](crate::Pdf)s. Nothing is
/// written until [`write`](PdfWriter::write) (or one of its variants) is
/// called; the writer can keep receiving pages afterwards.
///
/// # Example
///
/// ```ignore
/// let mut writer = PdfWriter::from_pages(pdf.select(&[0, 2])?, None)?;
/// writer.write_to_file("subset.pdf")?;
/// ```
#[derive(Debug)]
pub struct PdfWriter {
    inner: LopdfWriter,
}

impl PdfWriter {
    /// Create an empty output document.
    pub fn new(options: Option<WriteOptions>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            inner: LopdfBackend::new_writer(&options),
        }
    }

    /// Build a document containing exactly `pages`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while copying a page.
    pub fn from_pages<'a, I>(pages: I, options: Option<WriteOptions>) -> Result<Self, PdfError>
    where
        I: IntoIterator<Item = Page<'a>>,
    {
        build(Self::new(options), pages)
    }

    /// Append a copy of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::WriteError`] if the page object cannot be copied.
    pub fn add_page(&mut self, page: Page<'_>) -> Result<(), PdfError> {
        let backend_page = page.backend_page()?;
        LopdfBackend::add_page(&mut self.inner, page.pdf().document(), &backend_page)
            .map_err(PdfError::from)
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        LopdfBackend::writer_page_count(&self.inner)
    }

    /// Serialize the document to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::WriteError`] if serialization or the write fails.
    pub fn write<W: Write>(&mut self, out: &mut W) -> Result<(), PdfError> {
        LopdfBackend::save(&mut self.inner, out).map_err(PdfError::from)
    }

    /// Serialize the document into memory.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::WriteError`] if serialization fails.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PdfError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Serialize the document to a file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if the file cannot be created and
    /// [`PdfError::WriteError`] if serialization fails.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), PdfError> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut out = BufWriter::new(file);
        self.write(&mut out)?;
        out.flush()?;
        tracing::debug!(path = %path.as_ref().display(), pages = self.page_count(), "wrote PDF");
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<'a> PageSink<Page<'a>> for PdfWriter {
    type Error = PdfError;

    fn push_page(&mut self, page: Page<'a>) -> Result<(), PdfError> {
        self.add_page(page)
    }
}

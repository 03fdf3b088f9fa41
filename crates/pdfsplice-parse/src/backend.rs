//! PDF backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the document operations
//! page selection and splicing depend on: reading pages out of a source
//! document and appending them to a new output document.

use std::io::Write;

use pdfsplice_core::{PdfError, WriteOptions};

/// Trait abstracting PDF reading and writing.
///
/// # Associated Types
///
/// - `Document`: A parsed, read-only source document.
/// - `Page`: A reference to a single page within a document.
/// - `Writer`: An output document under construction.
/// - `Error`: Backend-specific error type, convertible to [`PdfError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let mut writer = MyBackend::new_writer(&WriteOptions::default());
/// MyBackend::add_page(&mut writer, &doc, &page)?;
/// MyBackend::save(&mut writer, &mut out)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page: Copy;

    /// An output document being assembled.
    type Writer;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a valid PDF document
    /// or the document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Extract the text shown on a page, one line per text line.
    ///
    /// # Errors
    ///
    /// Returns an error if the page content cannot be read or decoded.
    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error>;

    /// Create an empty output document.
    fn new_writer(options: &WriteOptions) -> Self::Writer;

    /// Append a copy of `page` (owned by `doc`) to the output document.
    ///
    /// # Errors
    ///
    /// Returns an error if the page object cannot be copied.
    fn add_page(
        writer: &mut Self::Writer,
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<(), Self::Error>;

    /// Number of pages appended to the output document so far.
    fn writer_page_count(writer: &Self::Writer) -> usize;

    /// Serialize the output document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn save(writer: &mut Self::Writer, out: &mut dyn Write) -> Result<(), Self::Error>;
}

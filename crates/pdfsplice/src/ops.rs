//! Free-function entry points for the three page operations.

use pdfsplice_core::{PdfError, Select};

use crate::{Page, Pdf, PdfWriter};

/// Pages of `pdf` at `indices`, lazily, in document order.
///
/// Equivalent to [`Pdf::select`].
///
/// # Errors
///
/// Returns [`PdfError::EmptyPageSelection`] if `indices` is empty and
/// [`PdfError::PageIndexOutOfRange`] if any index is past the last page.
pub fn page_subset<'a>(pdf: &'a Pdf, indices: &[usize]) -> Result<Select<&'a Pdf>, PdfError> {
    pdf.select(indices)
}

/// Replace the pages of `original` at `targets` with the pages of
/// `translated` and assemble the result into a new document.
///
/// Targets are matched to translated pages in ascending order: the first
/// translated page replaces the smallest target.
///
/// # Errors
///
/// Returns [`PdfError::PageCountMismatch`], [`PdfError::PageIndexOutOfRange`],
/// or [`PdfError::DuplicatePageIndex`] if `targets` is not a valid
/// placement, and [`PdfError::WriteError`] if a page cannot be copied.
pub fn paste_translated_pages(
    original: &Pdf,
    translated: &Pdf,
    targets: &[usize],
) -> Result<PdfWriter, PdfError> {
    let pages = original.splice(translated, targets)?;
    PdfWriter::from_pages(pages, None)
}

/// Assemble `pages` into a new document with default write options.
///
/// # Errors
///
/// Returns [`PdfError::WriteError`] if a page cannot be copied.
pub fn writer_from_pages<'a, I>(pages: I) -> Result<PdfWriter, PdfError>
where
    I: IntoIterator<Item = Page<'a>>,
{
    PdfWriter::from_pages(pages, None)
}

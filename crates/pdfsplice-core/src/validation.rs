//! Index-set precondition checks shared by selection and splicing.

use std::collections::HashSet;

use crate::PdfError;

/// Fail with [`PdfError::EmptyPageSelection`] if `indices` is empty.
pub fn check_not_empty(indices: &[usize]) -> Result<(), PdfError> {
    if indices.is_empty() {
        return Err(PdfError::EmptyPageSelection);
    }
    Ok(())
}

/// Fail if the largest index is not below `page_count`.
///
/// The reported index is the largest one, so the error names the same
/// position regardless of input order.
pub fn check_in_range(indices: &[usize], page_count: usize) -> Result<(), PdfError> {
    match indices.iter().copied().max() {
        Some(index) if index >= page_count => {
            Err(PdfError::PageIndexOutOfRange { index, page_count })
        }
        _ => Ok(()),
    }
}

/// Fail with the first index that repeats an earlier one.
pub fn check_distinct(indices: &[usize]) -> Result<(), PdfError> {
    let mut seen = HashSet::with_capacity(indices.len());
    for &index in indices {
        if !seen.insert(index) {
            return Err(PdfError::DuplicatePageIndex(index));
        }
    }
    Ok(())
}

/// Fail unless one target position was supplied per replacement page.
pub fn check_count(replacement_pages: usize, targets: usize) -> Result<(), PdfError> {
    if replacement_pages != targets {
        return Err(PdfError::PageCountMismatch {
            expected: replacement_pages,
            actual: targets,
        });
    }
    Ok(())
}

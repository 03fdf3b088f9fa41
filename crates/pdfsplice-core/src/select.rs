//! Page selection by index set.

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use crate::PdfError;
use crate::source::{PageSource, Pages};
use crate::validation::{check_in_range, check_not_empty};

/// Lazy sequence of the pages whose positions are in an index set.
///
/// Created by [`select`]. Pages come out in document order, not in the
/// order the indices were given; repeated indices select a page once.
#[derive(Debug, Clone)]
pub struct Select<D> {
    pages: Pages<D>,
    wanted: BTreeSet<usize>,
}

/// Select the pages of `source` at `indices`.
///
/// # Errors
///
/// Returns [`PdfError::EmptyPageSelection`] if `indices` is empty and
/// [`PdfError::PageIndexOutOfRange`] if any index is not below the page
/// count. Both are reported before any page is produced.
///
/// # Example
///
/// ```
/// use pdfsplice_core::select;
///
/// let doc = ["p0", "p1", "p2", "p3", "p4"];
/// let picked: Vec<_> = select(doc.as_slice(), &[4, 0, 2]).unwrap().copied().collect();
/// assert_eq!(picked, ["p0", "p2", "p4"]);
/// ```
pub fn select<D: PageSource>(source: D, indices: &[usize]) -> Result<Select<D>, PdfError> {
    check_not_empty(indices)?;
    check_in_range(indices, source.page_count())?;
    Ok(Select {
        pages: Pages::new(source),
        wanted: indices.iter().copied().collect(),
    })
}

impl<D: PageSource> Iterator for Select<D> {
    type Item = D::Page;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let position = self.pages.position();
            let page = self.pages.next()?;
            if self.wanted.contains(&position) {
                return Some(page);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.wanted.range(self.pages.position()..).count();
        (remaining, Some(remaining))
    }
}

impl<D: PageSource> ExactSizeIterator for Select<D> {}

impl<D: PageSource> FusedIterator for Select<D> {}

#[cfg(test)]
mod tests {
    use super::*;

    static DOC: [&str; 5] = ["p0", "p1", "p2", "p3", "p4"];

    fn collect(sel: Select<&'static [&'static str]>) -> Vec<&'static str> {
        sel.copied().collect()
    }

    #[test]
    fn selects_listed_pages() {
        let sel = select(DOC.as_slice(), &[0, 2, 4]).unwrap();
        assert_eq!(sel.len(), 3);
        assert_eq!(collect(sel), vec!["p0", "p2", "p4"]);
    }

    #[test]
    fn yields_in_document_order() {
        let sel = select(DOC.as_slice(), &[3, 1]).unwrap();
        assert_eq!(collect(sel), vec!["p1", "p3"]);
    }

    #[test]
    fn duplicate_indices_select_once() {
        let sel = select(DOC.as_slice(), &[1, 1, 1]).unwrap();
        assert_eq!(collect(sel), vec!["p1"]);
    }

    #[test]
    fn full_range_returns_every_page() {
        let all: Vec<usize> = (0..DOC.len()).collect();
        let sel = select(DOC.as_slice(), &all).unwrap();
        assert_eq!(collect(sel), DOC.to_vec());
    }

    #[test]
    fn index_equal_to_page_count_fails() {
        let err = select(DOC.as_slice(), &[DOC.len()]).unwrap_err();
        assert_eq!(
            err,
            PdfError::PageIndexOutOfRange {
                index: 5,
                page_count: 5
            }
        );
    }

    #[test]
    fn excessive_index_fails() {
        assert!(select(DOC.as_slice(), &[0, DOC.len() + 1]).is_err());
    }

    #[test]
    fn empty_selection_fails() {
        assert_eq!(
            select(DOC.as_slice(), &[]).unwrap_err(),
            PdfError::EmptyPageSelection
        );
    }

    #[test]
    fn single_pass() {
        let mut sel = select(DOC.as_slice(), &[0, 4]).unwrap();
        assert_eq!(sel.next().copied(), Some("p0"));
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.by_ref().count(), 1);
        assert!(sel.next().is_none());
    }
}

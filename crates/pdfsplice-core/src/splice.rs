//! Splicing replacement pages into an original document.

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use crate::PdfError;
use crate::source::{PageSource, Pages};
use crate::validation::{check_count, check_distinct, check_in_range};

/// Lazy sequence of an original document's pages with some positions
/// replaced by the pages of another document.
///
/// Created by [`splice`]. Yields exactly one page per original position.
/// The n-th replacement page lands on the n-th smallest target position,
/// whatever order the targets were given in.
#[derive(Debug, Clone)]
pub struct Splice<O, R> {
    original: Pages<O>,
    replacement: Pages<R>,
    targets: BTreeSet<usize>,
}

/// Replace the pages of `original` at `targets` with the pages of
/// `replacement`.
///
/// Targets are paired with replacement pages in ascending position order.
///
/// # Errors
///
/// Checked before any page is produced, in this order:
/// - [`PdfError::PageCountMismatch`] if `targets.len()` differs from the
///   replacement page count;
/// - [`PdfError::PageIndexOutOfRange`] if a target is not below the
///   original page count;
/// - [`PdfError::DuplicatePageIndex`] if a target repeats.
///
/// # Example
///
/// ```
/// use pdfsplice_core::splice;
///
/// let original = ["p0", "p1", "p2", "p3"];
/// let translated = ["r0", "r1", "r2"];
/// let pages: Vec<_> = splice(original.as_slice(), translated.as_slice(), &[0, 1, 2])
///     .unwrap()
///     .copied()
///     .collect();
/// assert_eq!(pages, ["r0", "r1", "r2", "p3"]);
/// ```
pub fn splice<O, R>(
    original: O,
    replacement: R,
    targets: &[usize],
) -> Result<Splice<O, R>, PdfError>
where
    O: PageSource,
    R: PageSource<Page = O::Page>,
{
    check_count(replacement.page_count(), targets.len())?;
    check_in_range(targets, original.page_count())?;
    check_distinct(targets)?;
    Ok(Splice {
        original: Pages::new(original),
        replacement: Pages::new(replacement),
        targets: targets.iter().copied().collect(),
    })
}

impl<O, R> Iterator for Splice<O, R>
where
    O: PageSource,
    R: PageSource<Page = O::Page>,
{
    type Item = O::Page;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.original.position();
        let page = self.original.next()?;
        if self.targets.contains(&position) {
            self.replacement.next()
        } else {
            Some(page)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.original.size_hint()
    }
}

impl<O, R> ExactSizeIterator for Splice<O, R>
where
    O: PageSource,
    R: PageSource<Page = O::Page>,
{
}

impl<O, R> FusedIterator for Splice<O, R>
where
    O: PageSource,
    R: PageSource<Page = O::Page>,
{
}

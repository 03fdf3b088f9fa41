//! Ordered page sources and the shared page cursor.
//!
//! [`PageSource`] is the read side of a document: a fixed page count and
//! random access by 0-based index. [`Pages`] walks a source in document
//! order and is the primitive both [`Select`](crate::Select) and
//! [`Splice`](crate::Splice) are built on.

use std::iter::FusedIterator;

/// A document viewed as an ordered, 0-indexed sequence of pages.
///
/// Implementations are expected to be cheap handles (usually a shared
/// reference), since iterators take the source by value.
pub trait PageSource {
    /// Page handle produced by this source.
    type Page;

    /// Number of pages, fixed for the lifetime of the source.
    fn page_count(&self) -> usize;

    /// Page at `index`.
    ///
    /// Callers only pass indices below [`page_count`](PageSource::page_count).
    fn page(&self, index: usize) -> Self::Page;
}

impl<'a, T> PageSource for &'a [T] {
    type Page = &'a T;

    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Self::Page {
        let pages: &'a [T] = self;
        &pages[index]
    }
}

/// Single-pass cursor over every page of a source, in document order.
///
/// Once exhausted it stays exhausted; there is no way to rewind.
#[derive(Debug, Clone)]
pub struct Pages<D> {
    source: D,
    position: usize,
    page_count: usize,
}

impl<D: PageSource> Pages<D> {
    /// Start a cursor at page 0 of `source`.
    pub fn new(source: D) -> Self {
        let page_count = source.page_count();
        Self {
            source,
            position: 0,
            page_count,
        }
    }

    /// Index of the page the next call to `next()` will yield.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Page count of the underlying source.
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

impl<D: PageSource> Iterator for Pages<D> {
    type Item = D::Page;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.page_count {
            return None;
        }
        let page = self.source.page(self.position);
        self.position += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.page_count - self.position;
        (remaining, Some(remaining))
    }
}

impl<D: PageSource> ExactSizeIterator for Pages<D> {}

impl<D: PageSource> FusedIterator for Pages<D> {}

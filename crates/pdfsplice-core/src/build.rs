//! Materializing a page sequence into an output document.

use std::convert::Infallible;

/// The write side of a document: something pages of type `P` can be
/// appended to.
pub trait PageSink<P> {
    /// Error raised when a page cannot be appended.
    type Error;

    /// Append `page` after every page pushed so far.
    fn push_page(&mut self, page: P) -> Result<(), Self::Error>;
}

impl<T> PageSink<T> for Vec<T> {
    type Error = Infallible;

    fn push_page(&mut self, page: T) -> Result<(), Self::Error> {
        self.push(page);
        Ok(())
    }
}

/// Consume `pages` to exhaustion, appending each to `sink` in order.
///
/// Pages may come from any number of source documents. The sink is
/// returned so the caller owns the finished document.
///
/// # Errors
///
/// Returns the first error raised by [`PageSink::push_page`]; pages after
/// the failing one are not consumed.
pub fn build<S, P, I>(mut sink: S, pages: I) -> Result<S, S::Error>
where
    S: PageSink<P>,
    I: IntoIterator<Item = P>,
{
    for page in pages {
        sink.push_page(page)?;
    }
    Ok(sink)
}

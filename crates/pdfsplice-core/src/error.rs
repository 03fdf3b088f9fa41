//! Error types for pdfsplice-rs.
//!
//! Provides [`PdfError`], the single error type surfaced by every layer.
//! Index-set precondition failures (bounds, count mismatch, duplicates) are
//! reported here as well, eagerly, before any page is produced.

use std::fmt;

/// Fatal error types for page selection, splicing, and document I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing PDF data.
    IoError(String),
    /// Error assembling or serializing an output document.
    WriteError(String),
    /// A page index is outside the document it was checked against.
    PageIndexOutOfRange {
        /// The offending 0-based index.
        index: usize,
        /// Page count of the document the index was checked against.
        page_count: usize,
    },
    /// The number of target positions does not match the replacement page count.
    PageCountMismatch {
        /// Number of pages in the replacement document.
        expected: usize,
        /// Number of target positions supplied.
        actual: usize,
    },
    /// The same page index appears more than once in an index set.
    DuplicatePageIndex(usize),
    /// An empty index set was supplied where at least one page is required.
    EmptyPageSelection,
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// The PDF is encrypted. Encrypted inputs are not supported.
    PasswordRequired,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::WriteError(msg) => write!(f, "write error: {msg}"),
            PdfError::PageIndexOutOfRange { index, page_count } => write!(
                f,
                "page index {index} out of range (document has {page_count} pages)"
            ),
            PdfError::PageCountMismatch { expected, actual } => write!(
                f,
                "page count mismatch: replacement has {expected} pages but {actual} target positions were given"
            ),
            PdfError::DuplicatePageIndex(index) => {
                write!(f, "page index {index} appears more than once")
            }
            PdfError::EmptyPageSelection => write!(f, "no pages selected"),
            PdfError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

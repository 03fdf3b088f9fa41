//! pdfsplice: Select, splice, and reassemble pages of PDF documents.
//!
//! This is the public API facade crate for pdfsplice-rs. It re-exports types from
//! pdfsplice-core and uses pdfsplice-parse for PDF reading and writing.
//!
//! # Architecture
//!
//! - **pdfsplice-core**: Backend-independent page sequencing and validation
//! - **pdfsplice-parse**: lopdf backend (open, page text, cross-document page copy)
//! - **pdfsplice** (this crate): Public API that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use pdfsplice::{Pdf, paste_translated_pages};
//!
//! let original = Pdf::open_file("original.pdf", None)?;
//! let translated = Pdf::open_file("translated.pdf", None)?;
//! let mut out = paste_translated_pages(&original, &translated, &[0, 1, 2])?;
//! out.write_to_file("merged.pdf")?;
//! ```

mod ops;
mod page;
mod pdf;
mod writer;

pub use ops::{page_subset, paste_translated_pages, writer_from_pages};
pub use page::Page;
pub use pdf::Pdf;
pub use pdfsplice_core::{
    OpenOptions, PageSink, PageSource, Pages, PdfError, Select, Splice, WriteOptions, build,
};
pub use writer::PdfWriter;

pub use pdfsplice_core;
pub use pdfsplice_parse;

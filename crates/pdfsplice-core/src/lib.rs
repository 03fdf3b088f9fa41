//! pdfsplice-core: Backend-independent page selection and splicing.
//!
//! This crate provides the page-sequencing primitives used by pdfsplice-rs:
//! [`select`] picks pages by index, [`splice`] substitutes pages from a
//! second document, and [`build`] materializes any page sequence into a
//! [`PageSink`]. Documents are seen only through [`PageSource`], so the
//! same code drives lopdf documents and plain slices alike.
//! It has no external dependencies.

pub mod build;
pub mod error;
pub mod options;
pub mod select;
pub mod source;
pub mod splice;
pub mod validation;

pub use build::{PageSink, build};
pub use error::PdfError;
pub use options::{OpenOptions, WriteOptions};
pub use select::{Select, select};
pub use source::{PageSource, Pages};
pub use splice::{Splice, splice};

//! pdfsplice-parse: PDF reading and writing backends.
//!
//! This crate implements the document layer of pdfsplice-rs behind the
//! [`PdfBackend`] trait: opening source documents, looking up pages,
//! extracting page text, and assembling output documents from pages of
//! other documents. [`LopdfBackend`] is the lopdf implementation.
//! It depends on pdfsplice-core for shared types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;
pub mod lopdf_writer;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use lopdf_writer::LopdfWriter;
pub use pdfsplice_core;

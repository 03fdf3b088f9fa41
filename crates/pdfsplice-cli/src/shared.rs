use std::path::Path;

use pdfsplice::{Pdf, PdfWriter, WriteOptions};

use crate::page_range::{parse_distinct_page_range, parse_page_range};

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<Pdf, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    Pdf::open_file(file, None).map_err(|e| {
        eprintln!("Error: failed to open {}: {e}", file.display());
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages (0..page_count).
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Resolve a page range in which every page must appear once.
pub fn resolve_distinct_pages(pages: &str, page_count: usize) -> Result<Vec<usize>, i32> {
    parse_distinct_page_range(pages, page_count).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Refuse an output path that names one of the input files.
pub fn check_output(output: &Path, inputs: &[&Path]) -> Result<(), i32> {
    let Ok(output) = output.canonicalize() else {
        // Output does not exist yet, so it cannot be an input.
        return Ok(());
    };
    for input in inputs {
        if input.canonicalize().is_ok_and(|input| input == output) {
            eprintln!(
                "Error: output {} would overwrite an input file",
                output.display()
            );
            return Err(1);
        }
    }
    Ok(())
}

/// Write options for the `--no-compress` flag.
pub fn write_options(no_compress: bool) -> WriteOptions {
    if no_compress {
        WriteOptions::uncompressed()
    } else {
        WriteOptions::default()
    }
}

/// Write `writer` to `output`, reporting failures on stderr.
pub fn save(writer: &mut PdfWriter, output: &Path) -> Result<(), i32> {
    log::debug!(
        "writing {} pages to {}",
        writer.page_count(),
        output.display()
    );
    writer.write_to_file(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })
}

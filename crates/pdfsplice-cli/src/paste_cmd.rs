use std::path::Path;

use pdfsplice::PdfWriter;

use crate::shared::{check_output, open_pdf, resolve_distinct_pages, save, write_options};

pub fn run(
    original: &Path,
    translated: &Path,
    pages: &str,
    output: &Path,
    no_compress: bool,
) -> Result<(), i32> {
    check_output(output, &[original, translated])?;
    let original_pdf = open_pdf(original)?;
    let translated_pdf = open_pdf(translated)?;
    let targets = resolve_distinct_pages(pages, original_pdf.page_count())?;

    let spliced = original_pdf
        .splice(&translated_pdf, &targets)
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    let mut writer =
        PdfWriter::from_pages(spliced, Some(write_options(no_compress))).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    save(&mut writer, output)?;

    println!(
        "Replaced {} of {} pages, wrote {}",
        targets.len(),
        writer.page_count(),
        output.display()
    );
    Ok(())
}

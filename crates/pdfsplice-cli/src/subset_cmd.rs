use std::path::Path;

use pdfsplice::PdfWriter;

use crate::shared::{check_output, open_pdf, resolve_pages, save, write_options};

pub fn run(file: &Path, pages: &str, output: &Path, no_compress: bool) -> Result<(), i32> {
    check_output(output, &[file])?;
    let pdf = open_pdf(file)?;
    let page_indices = resolve_pages(Some(pages), pdf.page_count())?;

    let selection = pdf.select(&page_indices).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    let mut writer =
        PdfWriter::from_pages(selection, Some(write_options(no_compress))).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    save(&mut writer, output)?;

    println!(
        "Wrote {} of {} pages to {}",
        writer.page_count(),
        pdf.page_count(),
        output.display()
    );
    Ok(())
}

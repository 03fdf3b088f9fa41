use std::path::Path;

use crate::cli::TextFormat;
use crate::shared::{open_pdf, resolve_pages};

pub fn run(file: &Path, pages: Option<&str>, format: &TextFormat) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    if page_indices.is_empty() {
        return Ok(());
    }
    let selection = pdf.select(&page_indices).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    for page in selection {
        let number = page.index() + 1;
        let text = page.extract_text().map_err(|e| {
            eprintln!("Error reading page {number}: {e}");
            1
        })?;

        match format {
            TextFormat::Text => {
                println!("--- Page {number} ---");
                println!("{text}");
            }
            TextFormat::Json => {
                let obj = serde_json::json!({
                    "page": number,
                    "text": text,
                });
                println!("{obj}");
            }
        }
    }
    Ok(())
}

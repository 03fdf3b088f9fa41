use std::path::Path;

use crate::cli::TextFormat;
use crate::shared::open_pdf;

pub fn run(file: &Path, format: &TextFormat) -> Result<(), i32> {
    let pdf = open_pdf(file)?;

    match format {
        TextFormat::Text => {
            println!("File: {}", file.display());
            println!("Pages: {}", pdf.page_count());
            println!("Version: {}", pdf.version());
        }
        TextFormat::Json => {
            let obj = serde_json::json!({
                "file": file.display().to_string(),
                "pages": pdf.page_count(),
                "version": pdf.version(),
            });
            println!("{obj}");
        }
    }
    Ok(())
}

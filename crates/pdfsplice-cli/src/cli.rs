use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Subset PDF documents and paste translated pages into them.
#[derive(Debug, Parser)]
#[command(name = "pdfsplice", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show page count and PDF version
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },

    /// Extract text from PDF pages
    Text {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },

    /// Write a new PDF containing only the selected pages
    Subset {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pages to keep (e.g. '1,3-5')
        #[arg(long)]
        pages: String,

        /// Output PDF path
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Write streams without compression
        #[arg(long)]
        no_compress: bool,
    },

    /// Replace pages of a PDF with the pages of a translated PDF
    Paste {
        /// Path to the original PDF
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Path to the translated PDF; its pages are used in order
        #[arg(value_name = "TRANSLATED")]
        translated: PathBuf,

        /// Pages of ORIGINAL to replace (e.g. '1-3'), one per translated page
        #[arg(long)]
        pages: String,

        /// Output PDF path
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Write streams without compression
        #[arg(long)]
        no_compress: bool,
    },
}

/// Output format for the reporting subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum TextFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}

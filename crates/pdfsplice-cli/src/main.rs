mod cli;
mod info_cmd;
mod page_range;
mod paste_cmd;
mod shared;
mod subset_cmd;
mod text_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Info {
            ref file,
            ref format,
        } => info_cmd::run(file, format),
        cli::Commands::Text {
            ref file,
            ref pages,
            ref format,
        } => text_cmd::run(file, pages.as_deref(), format),
        cli::Commands::Subset {
            ref file,
            ref pages,
            ref output,
            no_compress,
        } => subset_cmd::run(file, pages, output, no_compress),
        cli::Commands::Paste {
            ref original,
            ref translated,
            ref pages,
            ref output,
            no_compress,
        } => paste_cmd::run(original, translated, pages, output, no_compress),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

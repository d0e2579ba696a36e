use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tradedoc_pdf::{numbering, Assets, DocumentRecord, RenderConfig};

/// Render an export-trade record (JSON) to a fixed-format PDF.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the JSON document record.
    record: PathBuf,

    /// Output PDF path. Defaults to the document number, sanitized.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Letterhead image (PNG or JPEG) drawn at the top of every page.
    #[arg(long)]
    letterhead: Option<PathBuf>,

    /// Signature image placed in the signature block.
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Fail on malformed dates instead of substituting today's date.
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let json = std::fs::read(&args.record)?;
    let record: DocumentRecord = serde_json::from_slice(&json)?;

    let assets = Assets {
        letterhead: read_optional(&args.letterhead)?,
        signature: read_optional(&args.signature)?,
    };
    let config = RenderConfig {
        strict: args.strict,
    };

    let bytes = tradedoc_pdf::render_document(&record, &assets, &config)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(numbering::pdf_filename(record.number())));
    std::fs::write(&output, &bytes)?;
    Ok(output)
}

fn read_optional(path: &Option<PathBuf>) -> std::io::Result<Option<Vec<u8>>> {
    path.as_ref().map(std::fs::read).transpose()
}

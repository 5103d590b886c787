//! ledger-sheet: convert a bank CSV export into an income/expense ledger.
//!
//! ```bash
//! RUST_LOG=debug ledger-sheet umsaetze.csv ledger.pdf
//! ledger-sheet umsaetze.csv ledger.tex --title "Vereinskasse 2024"
//! ```

use clap::Parser;
use ledger_sheet::{ConversionOptions, Converter, OutputFormat};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

/// Convert a German bank CSV export (Sparkasse, Commerzbank, Volksbank) into a
/// paginated ledger with page subtotals and a grand total.
#[derive(Parser, Debug)]
#[command(name = "ledger-sheet")]
#[command(version, about)]
struct Args {
    /// CSV export to read
    input: PathBuf,

    /// Document to write
    output: PathBuf,

    /// Output format (latex or pdf); inferred from the output extension when omitted
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Title printed at the top of the ledger
    #[arg(long)]
    title: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (format, output) = match args.format {
        Some(format) => (format, output_path(args.output, format)),
        None => (OutputFormat::from_path(&args.output)?, args.output),
    };

    let mut options = ConversionOptions::new(format);
    if let Some(title) = args.title {
        options = options.with_title(title);
    }

    let input = File::open(&args.input)
        .map_err(|e| format!("cannot open {}: {}", args.input.display(), e))?;

    // render fully before touching the output file
    let mut document = Vec::new();
    let report = Converter::new(&options).convert(BufReader::new(input), &mut document)?;
    fs::write(&output, &document)
        .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;

    if report.dropped_rows > 0 {
        println!(
            "Hinweis: {} Zeile(n) ohne gültiges Buchungsdatum wurden übersprungen.",
            report.dropped_rows
        );
    }
    println!("Erfolgreich verarbeitet! Ausgabe in: {}", output.display());
    Ok(())
}

/// Swap a `.tex` extension for `.pdf` (and back) when an explicit format was requested
fn output_path(path: PathBuf, format: OutputFormat) -> PathBuf {
    match OutputFormat::from_path(&path) {
        Ok(current) if current != format => path.with_extension(format.extension()),
        _ => path,
    }
}

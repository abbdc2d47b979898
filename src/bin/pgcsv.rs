//! Reformat a comma delimited dictionary export for PostgreSQL `COPY`.

use anyhow::{Context, Result};
use clap::Parser;
use dante::csv_export::reformat;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pgcsv", about = "Convert a dictionary CSV export into ';' delimited rows")]
struct Args {
    /// Comma delimited export
    #[arg(short, long, default_value = "temp-latin.csv")]
    input: PathBuf,

    /// Destination for the ';' delimited rows
    #[arg(short, long, default_value = "temp-pglatin.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let rows = reformat(input, BufWriter::new(output))
        .with_context(|| format!("Failed to reformat {}", args.input.display()))?;

    info!(rows, output = %args.output.display(), "Export reformatted");
    Ok(())
}

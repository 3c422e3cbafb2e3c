//! Process command - extract records from a single purchase order.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use poex_core::pdf::extract_file_text;
use poex_core::{OrderParser, PoexConfig, PurchaseOrderParser};

use super::config::load_or_default;
use super::output::{format_text, write_csv, write_json, OutputFormat, TableRow};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or already-extracted text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = match config_path {
        Some(path) => load_or_default(Path::new(path))?,
        None => PoexConfig::default(),
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document_text(&args.input)?;

    let parser = PurchaseOrderParser::from_config(&config.extraction)?
        .with_min_text_length(config.pdf.min_text_length);
    let result = parser.parse(&text);

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let rows: Vec<TableRow<'_>> = result
        .outcome
        .records()
        .map(|record| TableRow {
            source: None,
            record,
        })
        .collect();

    let mut buffer = Vec::new();
    match args.format {
        OutputFormat::Json => write_json(&mut buffer, &rows)?,
        OutputFormat::Csv => write_csv(&mut buffer, &rows, false)?,
        OutputFormat::Text => {
            let records: Vec<_> = result.outcome.records().collect();
            buffer.write_all(format_text(&records).as_bytes())?;
        }
    }

    if let Some(output_path) = &args.output {
        fs::write(output_path, &buffer)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        std::io::stdout().write_all(&buffer)?;
    }

    debug!(
        "{} record(s), status {}, total time {:?}",
        result.outcome.len(),
        result.outcome.status(),
        start.elapsed()
    );

    Ok(())
}

/// Assembled text for a PDF, or the contents of a text file.
fn read_document_text(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => extract_file_text(path)?,
        "txt" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        warn!("No text extracted from {}", path.display());
    }

    Ok(text)
}

//! Batch command - extract every purchase order under a directory into one table.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use poex_core::{
    process_pdf, DocumentOutcome, DocumentSummary, PdfExtractor, PoexConfig, PurchaseOrderParser,
};

use super::config::load_or_default;
use super::output::{write_csv, write_json, TableFormat, TableRow};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory searched recursively for PDF files
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Output file (default: <input_dir>/<prefix>_<timestamp>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output table format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: TableFormat,

    /// Also write a per-document summary.csv next to the table
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Leave out the source-file column
    #[arg(long)]
    no_source_column: bool,
}

/// Outcome of one PDF, tagged with its file name.
struct ProcessResult {
    path: PathBuf,
    source: String,
    outcome: DocumentOutcome,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = match config_path {
        Some(path) => load_or_default(Path::new(path))?,
        None => PoexConfig::default(),
    };

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", args.input_dir.display());
    }

    let files = discover_pdfs(&args.input_dir)?;

    if files.is_empty() {
        println!(
            "{} No PDF files found in {}",
            style("ℹ").blue(),
            args.input_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} PDF files to process",
        style("ℹ").blue(),
        files.len()
    );

    let parser = Arc::new(
        PurchaseOrderParser::from_config(&config.extraction)?
            .with_min_text_length(config.pdf.min_text_length),
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let results = process_all(files, parser, args.jobs, &pb).await?;
    pb.finish_with_message("Complete");

    let include_source = config.output.include_source_column && !args.no_source_column;
    let rows: Vec<TableRow<'_>> = results
        .iter()
        .flat_map(|result| {
            result.outcome.records().map(move |record| TableRow {
                source: include_source.then_some(result.source.as_str()),
                record,
            })
        })
        .collect();

    let output_path = args.output.clone().unwrap_or_else(|| {
        default_output_path(&args.input_dir, &config.output.file_prefix, args.format)
    });
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(&output_path)?;
    match args.format {
        TableFormat::Csv => write_csv(file, &rows, include_source)?,
        TableFormat::Json => write_json(file, &rows)?,
    }
    println!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        rows.len(),
        output_path.display()
    );

    let summaries: Vec<DocumentSummary> = results
        .iter()
        .map(|r| DocumentSummary::from_outcome(r.source.clone(), &r.outcome))
        .collect();

    if args.summary {
        let summary_path = output_path
            .parent()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &summaries)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.outcome.error().is_some())
        .collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} without articles, {} failed",
        style(summaries.iter().filter(|s| s.status == "extracted").count()).green(),
        style(summaries.iter().filter(|s| s.status == "no_articles").count()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.outcome.error().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Every `*.pdf` under `dir`, de-duplicated by canonical path and sorted.
fn discover_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in ["*.pdf", "**/*.pdf"] {
        let pattern = dir.join(pattern);
        let pattern = pattern
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Non-UTF-8 path: {}", dir.display()))?;

        for entry in glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(fs::canonicalize(&path).unwrap_or(path));
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
    }

    debug!("Discovered {} PDF files under {}", files.len(), dir.display());
    Ok(files.into_iter().collect())
}

/// Run every file on a blocking worker, at most `jobs` at a time.
/// Results come back in input order; a worker that dies still leaves a
/// failed entry for its file.
async fn process_all(
    files: Vec<PathBuf>,
    parser: Arc<PurchaseOrderParser>,
    jobs: usize,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<ProcessResult>> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut set = JoinSet::new();

    for (index, path) in files.iter().cloned().enumerate() {
        let parser = Arc::clone(&parser);
        let pb = pb.clone();
        let permit = Arc::clone(&semaphore).acquire_owned().await?;

        set.spawn_blocking(move || {
            let _permit = permit;
            let outcome = process_file(&path, &parser);
            pb.inc(1);
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<DocumentOutcome>> = vec![None; files.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => {
                pb.inc(1);
                error!("Batch worker failed: {}", e);
            }
        }
    }

    Ok(files
        .into_iter()
        .zip(outcomes)
        .map(|(path, outcome)| {
            let outcome =
                outcome.unwrap_or_else(|| DocumentOutcome::failed("worker task did not complete"));
            let source = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            ProcessResult {
                path,
                source,
                outcome,
            }
        })
        .collect())
}

fn process_file(path: &Path, parser: &PurchaseOrderParser) -> DocumentOutcome {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return DocumentOutcome::failed(e.to_string());
        }
    };

    let mut extractor = PdfExtractor::new();
    let outcome = process_pdf(&data, &mut extractor, parser);
    debug!(
        "{}: {} record(s), status {}",
        path.display(),
        outcome.len(),
        outcome.status()
    );
    outcome
}

/// `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.<ext>`.
fn default_output_path(dir: &Path, prefix: &str, format: TableFormat) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.{}", prefix, timestamp, format.extension()))
}

fn write_summary(path: &Path, summaries: &[DocumentSummary]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(DocumentSummary::HEADERS)?;
    for summary in summaries {
        wtr.write_record(summary.values())?;
    }

    wtr.flush()?;
    Ok(())
}

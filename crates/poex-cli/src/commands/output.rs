//! Record table writers shared by the process and batch commands.

use std::io::Write;

use serde::Serialize;

use poex_core::{PoRecord, COLUMNS};

/// Header of the optional source-file column.
pub const SOURCE_COLUMN: &str = "SOURCE FILE";

/// Output format for a single document.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Output format for a batch table.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableFormat {
    /// CSV table
    Csv,
    /// JSON array
    Json,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// One table row, optionally tagged with the file it came from.
#[derive(Serialize)]
pub struct TableRow<'a> {
    #[serde(rename = "SOURCE FILE", skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    #[serde(flatten)]
    pub record: &'a PoRecord,
}

/// Write rows as CSV with the fixed column header.
pub fn write_csv<W: Write>(writer: W, rows: &[TableRow<'_>], with_source: bool) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if with_source {
        wtr.write_field(SOURCE_COLUMN)?;
    }
    wtr.write_record(COLUMNS)?;

    for row in rows {
        if with_source {
            wtr.write_field(row.source.unwrap_or_default())?;
        }
        wtr.write_record(row.record.values())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write rows as a pretty JSON array of column-keyed objects.
pub fn write_json<W: Write>(mut writer: W, rows: &[TableRow<'_>]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Human-readable listing: one block per record, empty cells skipped.
pub fn format_text(records: &[&PoRecord]) -> String {
    let width = COLUMNS.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        if records.len() > 1 {
            output.push_str(&format!("Record {}/{}\n", i + 1, records.len()));
        }
        for (column, value) in COLUMNS.iter().zip(record.values()) {
            if !value.is_empty() {
                output.push_str(&format!("  {:<width$}  {}\n", column, value, width = width));
            }
        }
        output.push('\n');
    }

    output
}

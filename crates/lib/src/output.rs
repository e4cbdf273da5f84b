//! # Output Writers
//!
//! Serializes the ordered records as a pretty-printed JSON array or as CSV rows.

use crate::{
    constants::{CSV_CATEGORY_SEPARATOR, DEFAULT_CSV_OUTPUT, DEFAULT_JSON_OUTPUT},
    errors::OutputError,
    types::OutputRecord,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// The column set of the CSV output.
pub const CSV_HEADER: [&str; 6] = [
    "file",
    "categories",
    "category",
    "caption",
    "footer",
    "footer_en",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => DEFAULT_JSON_OUTPUT,
            OutputFormat::Csv => DEFAULT_CSV_OUTPUT,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn write_json<W: Write>(mut writer: W, records: &[OutputRecord]) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, records: &[OutputRecord]) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        let categories = record.analysis.categories.join(CSV_CATEGORY_SEPARATOR);
        csv_writer.write_record([
            record.source.display_name.as_str(),
            categories.as_str(),
            record.analysis.category.as_str(),
            record.analysis.caption.as_str(),
            record.analysis.footer.as_str(),
            record.analysis.footer_en.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `records` to a new file at `path`.
pub fn write_records(
    path: &Path,
    format: OutputFormat,
    records: &[OutputRecord],
) -> Result<(), OutputError> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(writer, records)?,
        OutputFormat::Csv => write_csv(writer, records)?,
    }
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

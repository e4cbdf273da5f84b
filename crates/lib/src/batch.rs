//! # Batch Orchestration
//!
//! Reads the URL list and drives the [`ImageAnalyzer`] over it through the bounded
//! work pool.

use crate::{
    analyzer::ImageAnalyzer,
    constants::DEFAULT_CONCURRENCY,
    pool::{effective_concurrency, run_bounded},
    types::{ImageSource, OutputRecord},
};
use std::path::Path;
use tracing::info;

/// Parses a newline-delimited URL list. Lines are trimmed and blanks dropped.
pub fn parse_url_list(text: &str) -> Vec<ImageSource> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ImageSource::from_url)
        .collect()
}

/// Reads and parses the URL list at `path`.
pub async fn read_url_list(path: &Path) -> std::io::Result<Vec<ImageSource>> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse_url_list(&text))
}

/// Parses a configured concurrency bound, falling back to [`DEFAULT_CONCURRENCY`]
/// when it is absent or not an integer. Values below one are left for the pool to clamp.
pub fn parse_concurrency(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY)
}

/// Analyzes every source, returning one record per source in input order.
pub async fn run_batch(
    analyzer: &ImageAnalyzer,
    sources: &[ImageSource],
    concurrency: i64,
) -> Vec<OutputRecord> {
    info!(
        "Starting batch of {} images with concurrency {}",
        sources.len(),
        effective_concurrency(concurrency)
    );

    let records = run_bounded(concurrency, sources, |source, _| analyzer.analyze(source)).await;

    let degraded = records
        .iter()
        .filter(|record| record.analysis.is_unknown())
        .count();
    info!(
        "Batch finished: {} records, {} without a usable analysis",
        records.len(),
        degraded
    );

    records
}

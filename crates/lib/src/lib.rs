//! # Image Captioning Pipeline
//!
//! This crate batch-processes a list of remote image URLs. For each image it
//! concurrently extracts camera metadata from the EXIF block and asks a multimodal
//! model for a structured caption/category analysis, then merges both into one
//! [`OutputRecord`]. Records keep input order and are written as JSON or CSV.
//!
//! Per-image failures never abort a batch: a failed fetch yields empty metadata and
//! a failed or unparseable analysis yields [`AnalysisResult::unavailable`].

pub mod analyzer;
pub mod batch;
pub mod constants;
pub mod errors;
pub mod extract;
pub mod metadata;
pub mod output;
pub mod pool;
pub mod prompts;
pub mod providers;
pub mod types;

pub use analyzer::{ImageAnalyzer, ImageAnalyzerBuilder};
pub use batch::{parse_concurrency, parse_url_list, read_url_list, run_batch};
pub use errors::{AiError, MetadataError, OutputError};
pub use output::{write_records, OutputFormat};
pub use types::{AnalysisResult, ImageMetadata, ImageSource, OutputRecord};

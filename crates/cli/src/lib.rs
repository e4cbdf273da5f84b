//! # `photocap-cli` Library Crate
//!
//! Holds the configuration surface of the `photocap` binary and the `run`
//! function that wires configuration into the `photocap` pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use photocap::{
    constants::DEFAULT_URLS_FILE,
    parse_concurrency,
    providers::factory::{create_provider, ProviderSettings},
    read_url_list, run_batch, write_records, ImageAnalyzerBuilder, OutputFormat,
};
use std::path::PathBuf;
use tracing::info;

// --- CLI Argument Struct ---

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Caption and categorize a list of remote images", long_about = None)]
pub struct Cli {
    /// File with one image URL per line.
    #[arg(long, env = "URLS_FILE", default_value = DEFAULT_URLS_FILE)]
    pub input: PathBuf,

    /// Where to write the results. Defaults to captions.json or captions.csv.
    #[arg(long, env = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Output format: `json` or `csv`.
    #[arg(long, env = "OUTPUT_FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// Maximum number of images processed at once. Non-numeric values fall back to 5.
    #[arg(long, env = "CONCURRENCY")]
    pub concurrency: Option<String>,

    /// AI provider: `openai` or `local` (any OpenAI-compatible chat endpoint).
    #[arg(long, env = "AI_PROVIDER", default_value = "openai")]
    pub provider: String,

    /// API key for the provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for image analysis.
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Override of the provider endpoint URL.
    #[arg(long, env = "OPENAI_API_URL")]
    pub api_url: Option<String>,

    /// File holding a replacement for the built-in analysis prompt.
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
}

impl Cli {
    /// The output path, falling back to the format's default file name.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name()))
    }

    fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            provider: self.provider.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub records: usize,
}

// --- Public Entrypoint ---

/// Runs a full batch: configure, read URLs, analyze, write.
///
/// Configuration problems (such as a missing API key) fail before any URL is read.
pub async fn run(cli: Cli) -> Result<RunSummary> {
    // 1. Configuration
    let provider = create_provider(&cli.provider_settings())
        .context("Failed to configure the AI provider (is OPENAI_API_KEY set?)")?;

    let mut builder = ImageAnalyzerBuilder::new().ai_provider(provider);
    if let Some(prompt_file) = &cli.prompt_file {
        let prompt = tokio::fs::read_to_string(prompt_file)
            .await
            .with_context(|| format!("Failed to read prompt file '{}'", prompt_file.display()))?;
        builder = builder.prompt(prompt);
    }
    let analyzer = builder.build()?;
    let concurrency = parse_concurrency(cli.concurrency.as_deref());

    // 2. Input
    let sources = read_url_list(&cli.input)
        .await
        .with_context(|| format!("Failed to read URL list '{}'", cli.input.display()))?;
    info!(
        "Loaded {} image URLs from {}",
        sources.len(),
        cli.input.display()
    );

    // 3. Analysis
    let records = run_batch(&analyzer, &sources, concurrency).await;

    // 4. Output
    let output_path = cli.output_path();
    write_records(&output_path, cli.format, &records)
        .with_context(|| format!("Failed to write '{}'", output_path.display()))?;

    Ok(RunSummary {
        output_path,
        records: records.len(),
    })
}

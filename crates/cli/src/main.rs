//! # photocap: Batch Image Captioning
//!
//! This is the main entry point for the `photocap` command-line interface.
//! The binary is a thin entrypoint; all logic lives in the `photocap_cli`
//! library crate.

use anyhow::Result;
use clap::Parser;
use photocap_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env before clap reads its `env` fallbacks.
    dotenvy::dotenv().ok();

    // 2. Setup logging
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("photocap=info".parse()?))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments
    let cli = Cli::parse();

    // 4. Run and report the final result
    match run(cli).await {
        Ok(summary) => {
            println!(
                "✔ {} written ({} records)",
                summary.output_path.display(),
                summary.records
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("[photocap error] {e:?}");
            std::process::exit(1);
        }
    }
}

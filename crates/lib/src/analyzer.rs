//! # Per-Item Analysis
//!
//! For one image, runs the metadata branch and the model branch concurrently and
//! merges both into an [`OutputRecord`]. Each branch absorbs its own failures, so
//! an item always yields a record and never affects its neighbours.

use crate::{
    errors::AiError,
    extract::parse_analysis,
    metadata::{extract_metadata, ExifTagDecoder, HttpImageFetcher, ImageFetcher, TagDecoder},
    prompts::IMAGE_ANALYSIS_PROMPT,
    providers::ai::AiProvider,
    types::{AnalysisResult, ImageSource, OutputRecord},
};
use std::fmt;
use tracing::{debug, error, info};

/// Analyzes single images with a configured provider, fetcher and decoder.
pub struct ImageAnalyzer {
    pub(crate) provider: Box<dyn AiProvider>,
    pub(crate) fetcher: Box<dyn ImageFetcher>,
    pub(crate) decoder: Box<dyn TagDecoder>,
    pub(crate) prompt: String,
}

impl fmt::Debug for ImageAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAnalyzer")
            .field("provider", &self.provider)
            .field("fetcher", &self.fetcher)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl ImageAnalyzer {
    /// Produces the output record for `source`.
    pub async fn analyze(&self, source: ImageSource) -> OutputRecord {
        info!("Processing {}...", source.display_name);

        let (metadata, analysis) = tokio::join!(
            extract_metadata(self.fetcher.as_ref(), self.decoder.as_ref(), &source.url),
            self.describe(&source)
        );

        OutputRecord::merge(source, analysis, metadata)
    }

    /// Asks the provider about the image. A failed call yields the same fallback
    /// record as an unparseable reply.
    pub async fn describe(&self, source: &ImageSource) -> AnalysisResult {
        match self.provider.analyze_image(&self.prompt, &source.url).await {
            Ok(text) => {
                debug!("<-- Analysis for {}: {}", source.display_name, text);
                parse_analysis(&text)
            }
            Err(e) => {
                error!("Error processing {}: {e}", source.display_name);
                AnalysisResult::unavailable()
            }
        }
    }
}

/// A builder for [`ImageAnalyzer`].
///
/// Only the provider is required. The fetcher defaults to [`HttpImageFetcher`], the
/// decoder to [`ExifTagDecoder`] and the prompt to [`IMAGE_ANALYSIS_PROMPT`].
#[derive(Default)]
pub struct ImageAnalyzerBuilder {
    provider: Option<Box<dyn AiProvider>>,
    fetcher: Option<Box<dyn ImageFetcher>>,
    decoder: Option<Box<dyn TagDecoder>>,
    prompt: Option<String>,
}

impl ImageAnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn image_fetcher(mut self, fetcher: Box<dyn ImageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn tag_decoder(mut self, decoder: Box<dyn TagDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Overrides the instruction prompt sent with every image.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn build(self) -> Result<ImageAnalyzer, AiError> {
        let provider = self.provider.ok_or(AiError::MissingAiProvider)?;
        Ok(ImageAnalyzer {
            provider,
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Box::new(HttpImageFetcher::default())),
            decoder: self
                .decoder
                .unwrap_or_else(|| Box::new(ExifTagDecoder)),
            prompt: self
                .prompt
                .unwrap_or_else(|| IMAGE_ANALYSIS_PROMPT.to_string()),
        })
    }
}

//! # AI Provider Factory
//!
//! Builds the configured provider behind the `AiProvider` trait so callers
//! (the CLI, tests) never name a concrete provider type.

use crate::{
    constants::{DEFAULT_MODEL, DEFAULT_OPENAI_API_URL},
    errors::AiError,
    providers::ai::{local::LocalAiProvider, openai::OpenAiProvider, AiProvider},
};
use tracing::info;

/// Settings needed to construct a provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// The provider kind: `openai` or `local`.
    pub provider: String,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_url: None,
            api_key: None,
            model: None,
        }
    }
}

/// Creates a provider instance from `settings`.
///
/// The `openai` provider requires an API key; the `local` provider requires an API URL.
pub fn create_provider(settings: &ProviderSettings) -> Result<Box<dyn AiProvider>, AiError> {
    let model = settings
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let provider: Box<dyn AiProvider> = match settings.provider.as_str() {
        "openai" => {
            let api_key = settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or(AiError::MissingApiKey)?;
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());
            info!("Configuring OpenAI provider with URL: {api_url}, model: {model}");
            Box::new(OpenAiProvider::new(api_url, api_key, model)?)
        }
        "local" => {
            let api_url = settings.api_url.clone().ok_or_else(|| {
                AiError::UnsupportedProvider(
                    "the local provider requires an API URL".to_string(),
                )
            })?;
            info!("Configuring local AI provider with URL: {api_url}");
            Box::new(LocalAiProvider::new(
                api_url,
                settings.api_key.clone(),
                Some(model),
            )?)
        }
        other => return Err(AiError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}

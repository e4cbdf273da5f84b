pub mod local;
pub mod openai;

use crate::errors::AiError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a multimodal AI provider.
///
/// Implementations send one instruction prompt together with one image URL and
/// return the model's raw, unstructured text reply.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Asks the model to analyze the image at `image_url` following `instruction`.
    async fn analyze_image(&self, instruction: &str, image_url: &str) -> Result<String, AiError>;
}

dyn_clone::clone_trait_object!(AiProvider);

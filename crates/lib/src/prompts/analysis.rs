//! # Image Analysis Prompt

/// The instruction sent alongside every image.
///
/// The model is asked for a bare JSON object. Replies are still run through the
/// response extractor, since models often wrap the object in a code fence or prose.
pub const IMAGE_ANALYSIS_PROMPT: &str = r#"Analyze the image and respond ONLY with JSON using this structure:

{
  "categories": ["an array of categories (e.g. city, landscape, architecture, people, portrait, event)"],
  "footer": "a short, natural, descriptive photo footer in neutral Spanish, using Chilean idioms only where it fits",
  "footer_en": "the same footer in English",
  "caption": "a detailed description of the image in neutral Spanish, without value judgements"
}

Do not add any text outside the JSON."#;

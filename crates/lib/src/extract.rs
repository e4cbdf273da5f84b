//! # Response Extraction
//!
//! Recovers the JSON object from a model's free-form reply and coerces it into an
//! [`AnalysisResult`]. [`parse_analysis`] accepts any text and always returns a
//! usable record.

use crate::{constants::UNKNOWN_CATEGORY, types::AnalysisResult};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

/// Keys holding the category list, in lookup order. Models sometimes misspell the
/// plural, and some answer with only the singular.
const CATEGORY_KEYS: [&str; 3] = ["categories", "categores", "category"];

/// Narrows model output down to the text most likely to be the JSON object.
///
/// 1. The inner content of a fenced code block (optionally tagged `json`).
/// 2. Otherwise the span from the first `{` to the last `}`.
/// 3. Otherwise the trimmed text.
pub fn extract_likely_json(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return trimmed;
    }

    // Regex to extract the body of a markdown code block.
    if let Ok(re) = Regex::new(r"(?i)```(?:json)?\s*([\s\S]*?)\s*```") {
        let fenced = re
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|inner| !inner.is_empty());
        if let Some(inner) = fenced {
            return inner;
        }
    }

    if let (Some(first), Some(last)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if last > first {
            return &trimmed[first..=last];
        }
    }

    trimmed
}

/// Parses a model reply into an [`AnalysisResult`].
///
/// Anything that does not yield a JSON object produces [`AnalysisResult::unavailable`].
pub fn parse_analysis(text: &str) -> AnalysisResult {
    let json_text = extract_likely_json(text);
    match serde_json::from_str::<Value>(json_text) {
        Ok(Value::Object(object)) => coerce_analysis(&object),
        Ok(other) => {
            warn!("Model response is JSON but not an object: {other}");
            AnalysisResult::unavailable()
        }
        Err(e) => {
            warn!("Failed to parse model response as JSON: {e}");
            AnalysisResult::unavailable()
        }
    }
}

fn coerce_analysis(object: &Map<String, Value>) -> AnalysisResult {
    let raw_categories = CATEGORY_KEYS
        .iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()));
    let categories = coerce_to_strings(raw_categories);

    let category = non_blank_field(object, "category")
        .or_else(|| categories.first().cloned())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

    AnalysisResult {
        categories,
        category,
        caption: non_blank_field(object, "caption").unwrap_or_default(),
        footer: non_blank_field(object, "footer").unwrap_or_default(),
        footer_en: non_blank_field(object, "footer_en").unwrap_or_default(),
    }
}

/// Arrays are stringified element-wise with empty elements dropped; a non-blank
/// string becomes a one-element list; anything else is empty.
pub fn coerce_to_strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(stringify)
            .filter(|item| !item.is_empty())
            .collect(),
        Some(Value::String(text)) if !text.trim().is_empty() => vec![text.trim().to_string()],
        _ => Vec::new(),
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// The trimmed string at `key`, if it is a string with visible content.
fn non_blank_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

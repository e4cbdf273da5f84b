use crate::constants::{UNAVAILABLE_CAPTION, UNKNOWN_CATEGORY};
use serde::{Deserialize, Serialize};

/// One input image: its URL and the display name derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    #[serde(rename = "file")]
    pub display_name: String,
}

impl ImageSource {
    /// Builds a source from a URL, taking the final path segment as the display name.
    pub fn from_url(url: &str) -> Self {
        let display_name = url.rsplit('/').next().unwrap_or(url).to_string();
        Self {
            url: url.to_string(),
            display_name,
        }
    }
}

/// The structured caption/category analysis of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub categories: Vec<String>,
    pub category: String,
    pub caption: String,
    pub footer: String,
    pub footer_en: String,
}

impl AnalysisResult {
    /// The fallback used when the model call fails or its text cannot be parsed.
    pub fn unavailable() -> Self {
        Self {
            categories: Vec::new(),
            category: UNKNOWN_CATEGORY.to_string(),
            caption: UNAVAILABLE_CAPTION.to_string(),
            footer: String::new(),
            footer_en: String::new(),
        }
    }

    /// Returns `true` if no usable category was produced for the image.
    pub fn is_unknown(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }
}

/// Camera metadata recovered from an image's EXIF block.
///
/// A `None` field means the value was absent or could not be interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(rename = "shutterSpeed", skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
}

impl ImageMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The merged, per-image record written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub source: ImageSource,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub stars: u8,
    pub portfolio: bool,
    pub visible: bool,
    #[serde(flatten)]
    pub metadata: ImageMetadata,
}

impl OutputRecord {
    /// Merges the three per-item parts, stamping the fixed catalog defaults.
    pub fn merge(source: ImageSource, analysis: AnalysisResult, metadata: ImageMetadata) -> Self {
        Self {
            source,
            analysis,
            stars: 0,
            portfolio: false,
            visible: true,
            metadata,
        }
    }
}

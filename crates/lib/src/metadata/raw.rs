//! # Raw Tag Tree
//!
//! Each camera field can show up in several shapes depending on the camera and the
//! decoder. Every accepted shape is a variant here, so the normalizer matches on
//! variants instead of inspecting values at runtime.

/// Focal length as stored by the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum FocalLengthTag {
    Number(f64),
    /// Already rendered for humans, e.g. `"35 mm"`.
    Description(String),
    List(Vec<f64>),
}

/// The f-number.
#[derive(Debug, Clone, PartialEq)]
pub enum FNumberTag {
    /// `numerator / denominator`.
    Rational(f64, f64),
    Number(f64),
    /// Possibly prefixed with `f/`.
    Text(String),
}

/// ISO speed.
#[derive(Debug, Clone, PartialEq)]
pub enum IsoTag {
    Number(u32),
    Text(String),
    List(Vec<u32>),
}

/// Exposure time in seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExposureTag {
    /// Already rendered, e.g. `"1/250"`.
    Text(String),
    Number(f64),
    List(Vec<f64>),
}

/// A textual field that may be split into fragments (make, model, lens).
#[derive(Debug, Clone, PartialEq)]
pub enum TextTag {
    Text(String),
    Fragments(Vec<String>),
}

impl TextTag {
    /// Joins fragments with spaces. Returns `None` when nothing but whitespace remains.
    pub fn joined(&self) -> Option<String> {
        let text = match self {
            TextTag::Text(text) => text.clone(),
            TextTag::Fragments(parts) => parts.join(" "),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// The subset of an image's EXIF block the normalizer understands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTagTree {
    pub focal_length: Option<FocalLengthTag>,
    pub f_number: Option<FNumberTag>,
    pub iso: Option<IsoTag>,
    pub exposure_time: Option<ExposureTag>,
    pub make: Option<TextTag>,
    pub model: Option<TextTag>,
    pub lens_model: Option<TextTag>,
}

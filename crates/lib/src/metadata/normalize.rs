//! # Metadata Normalizer
//!
//! Turns a [`RawTagTree`] into an [`ImageMetadata`]. Nothing here fails: a field
//! that cannot be interpreted is left out of the result.

use super::raw::{ExposureTag, FNumberTag, FocalLengthTag, IsoTag, RawTagTree, TextTag};
use crate::types::ImageMetadata;

pub fn normalize(tree: &RawTagTree) -> ImageMetadata {
    ImageMetadata {
        focal: tree.focal_length.as_ref().and_then(normalize_focal),
        aperture: tree.f_number.as_ref().and_then(normalize_aperture),
        iso: tree.iso.as_ref().and_then(normalize_iso),
        shutter_speed: tree.exposure_time.as_ref().and_then(normalize_shutter),
        camera: normalize_camera(tree.make.as_ref(), tree.model.as_ref()),
        lens: tree.lens_model.as_ref().and_then(TextTag::joined),
    }
}

/// Renders numbers as `"<value>mm"`; descriptions pass through untouched.
pub fn normalize_focal(tag: &FocalLengthTag) -> Option<String> {
    match tag {
        FocalLengthTag::Number(value) => format_focal(*value),
        FocalLengthTag::Description(text) => non_blank(text),
        FocalLengthTag::List(values) => values.first().copied().and_then(format_focal),
    }
}

fn format_focal(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value}mm"))
}

/// Rationals are divided and rounded to one decimal place.
pub fn normalize_aperture(tag: &FNumberTag) -> Option<f64> {
    let value = match tag {
        FNumberTag::Rational(numerator, denominator) => {
            if *denominator == 0.0 {
                return None;
            }
            ((numerator / denominator) * 10.0).round() / 10.0
        }
        FNumberTag::Number(value) => *value,
        FNumberTag::Text(text) => {
            let trimmed = text.trim();
            let cleaned = match trimmed.get(..2) {
                Some(prefix) if prefix.eq_ignore_ascii_case("f/") => &trimmed[2..],
                _ => trimmed,
            };
            cleaned.trim().parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

pub fn normalize_iso(tag: &IsoTag) -> Option<u32> {
    match tag {
        IsoTag::Number(value) => Some(*value),
        IsoTag::Text(text) => parse_leading_integer(text),
        IsoTag::List(values) => values.first().copied(),
    }
}

/// Parses the leading run of ASCII digits, so `"400"` and `"400 (auto)"` both give 400.
fn parse_leading_integer(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Fractions of a second render as `"1/<n>s"`, longer exposures as `"<e>s"`.
pub fn normalize_shutter(tag: &ExposureTag) -> Option<String> {
    match tag {
        ExposureTag::Text(text) => non_blank(text),
        ExposureTag::Number(value) => format_exposure(*value),
        ExposureTag::List(values) => values.first().copied().and_then(format_exposure),
    }
}

fn format_exposure(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    if seconds < 1.0 {
        Some(format!("1/{}s", (1.0 / seconds).round()))
    } else {
        Some(format!("{seconds}s"))
    }
}

/// `"<make> <model>"`, or just the model. A make without a model is dropped.
pub fn normalize_camera(make: Option<&TextTag>, model: Option<&TextTag>) -> Option<String> {
    let model = model.and_then(TextTag::joined)?;
    match make.and_then(TextTag::joined) {
        Some(make) => Some(format!("{make} {model}")),
        None => Some(model),
    }
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

//! # EXIF Decoding
//!
//! Reads the primary IFD of an image with `kamadak-exif` and lifts the fields we
//! care about into the tagged unions of [`RawTagTree`].

use super::raw::{ExposureTag, FNumberTag, FocalLengthTag, IsoTag, RawTagTree, TextTag};
use crate::errors::MetadataError;
use exif::{In, Tag, Value};
use std::fmt::Debug;
use std::io::Cursor;

/// Decodes raw image bytes into a [`RawTagTree`].
pub trait TagDecoder: Send + Sync + Debug {
    fn decode(&self, bytes: &[u8]) -> Result<RawTagTree, MetadataError>;
}

/// The production decoder, backed by `kamadak-exif`.
#[derive(Debug, Clone, Default)]
pub struct ExifTagDecoder;

impl TagDecoder for ExifTagDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawTagTree, MetadataError> {
        let exif = exif::Reader::new().read_from_container(&mut Cursor::new(bytes))?;
        Ok(tree_from_lookup(|tag| {
            exif.get_field(tag, In::PRIMARY).map(|field| &field.value)
        }))
    }
}

/// Builds a tree from any tag lookup. Values of unexpected types are skipped.
pub fn tree_from_lookup<'a, F>(lookup: F) -> RawTagTree
where
    F: Fn(Tag) -> Option<&'a Value>,
{
    RawTagTree {
        focal_length: lookup(Tag::FocalLength).and_then(focal_length_tag),
        f_number: lookup(Tag::FNumber).and_then(f_number_tag),
        iso: lookup(Tag::PhotographicSensitivity).and_then(iso_tag),
        exposure_time: lookup(Tag::ExposureTime).and_then(exposure_tag),
        make: lookup(Tag::Make).and_then(text_tag),
        model: lookup(Tag::Model).and_then(text_tag),
        lens_model: lookup(Tag::LensModel).and_then(text_tag),
    }
}

fn focal_length_tag(value: &Value) -> Option<FocalLengthTag> {
    if let Some(text) = ascii_text(value) {
        return Some(FocalLengthTag::Description(text));
    }
    let mut numbers = numeric_values(value)?;
    match numbers.len() {
        0 => None,
        1 => numbers.pop().map(FocalLengthTag::Number),
        _ => Some(FocalLengthTag::List(numbers)),
    }
}

fn f_number_tag(value: &Value) -> Option<FNumberTag> {
    match value {
        Value::Rational(rationals) => rationals
            .first()
            .map(|r| FNumberTag::Rational(f64::from(r.num), f64::from(r.denom))),
        Value::SRational(rationals) => rationals
            .first()
            .map(|r| FNumberTag::Rational(f64::from(r.num), f64::from(r.denom))),
        Value::Ascii(_) => ascii_text(value).map(FNumberTag::Text),
        _ => numeric_values(value)?
            .first()
            .copied()
            .map(FNumberTag::Number),
    }
}

fn iso_tag(value: &Value) -> Option<IsoTag> {
    let mut speeds: Vec<u32> = match value {
        Value::Short(values) => values.iter().map(|v| u32::from(*v)).collect(),
        Value::Long(values) => values.clone(),
        Value::Ascii(_) => return ascii_text(value).map(IsoTag::Text),
        _ => return None,
    };
    match speeds.len() {
        0 => None,
        1 => speeds.pop().map(IsoTag::Number),
        _ => Some(IsoTag::List(speeds)),
    }
}

fn exposure_tag(value: &Value) -> Option<ExposureTag> {
    if let Some(text) = ascii_text(value) {
        return Some(ExposureTag::Text(text));
    }
    let mut numbers = numeric_values(value)?;
    match numbers.len() {
        0 => None,
        1 => numbers.pop().map(ExposureTag::Number),
        _ => Some(ExposureTag::List(numbers)),
    }
}

fn text_tag(value: &Value) -> Option<TextTag> {
    let mut fragments = ascii_fragments(value)?;
    match fragments.len() {
        0 => None,
        1 => fragments.pop().map(TextTag::Text),
        _ => Some(TextTag::Fragments(fragments)),
    }
}

/// Every non-empty ASCII component, stripped of NUL padding.
fn ascii_fragments(value: &Value) -> Option<Vec<String>> {
    let Value::Ascii(components) = value else {
        return None;
    };
    Some(
        components
            .iter()
            .map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .trim()
                    .to_string()
            })
            .filter(|text| !text.is_empty())
            .collect(),
    )
}

fn ascii_text(value: &Value) -> Option<String> {
    let fragments = ascii_fragments(value)?;
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(" "))
    }
}

fn numeric_values(value: &Value) -> Option<Vec<f64>> {
    let numbers = match value {
        Value::Rational(values) => values.iter().map(|r| r.to_f64()).collect(),
        Value::SRational(values) => values.iter().map(|r| r.to_f64()).collect(),
        Value::Byte(values) => values.iter().map(|v| f64::from(*v)).collect(),
        Value::Short(values) => values.iter().map(|v| f64::from(*v)).collect(),
        Value::Long(values) => values.iter().map(|v| f64::from(*v)).collect(),
        Value::Float(values) => values.iter().map(|v| f64::from(*v)).collect(),
        Value::Double(values) => values.clone(),
        _ => return None,
    };
    Some(numbers)
}

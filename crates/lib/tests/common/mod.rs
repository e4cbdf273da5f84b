#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Mock providers, fetchers and decoders so pipeline tests run without a network
//! or a real model.

use async_trait::async_trait;
use dotenvy::dotenv;
use photocap::errors::{AiError, MetadataError};
use photocap::metadata::raw::{ExposureTag, FNumberTag, FocalLengthTag, IsoTag, TextTag};
use photocap::metadata::{ImageFetcher, RawTagTree, TagDecoder};
use photocap::providers::ai::AiProvider;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Mock AI Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    /// Responses keyed by a substring of the image URL.
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    fail_all: bool,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every call fails as if the service were down.
    pub fn failing_all() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_default_response(self, response: &str) -> Self {
        *self.default_response.lock().unwrap() = Some(response.to_string());
        self
    }

    pub fn add_response(&self, url_key: &str, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url_key.to_string(), response.to_string());
    }

    pub fn fail_for(&self, url_key: &str) {
        self.failing.lock().unwrap().insert(url_key.to_string());
    }

    pub fn delay_for(&self, url_key: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(url_key.to_string(), delay);
    }

    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn lookup<T: Clone>(map: &Mutex<HashMap<String, T>>, url: &str) -> Option<T> {
        map.lock()
            .unwrap()
            .iter()
            .find(|(key, _)| url.contains(key.as_str()))
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn analyze_image(&self, instruction: &str, image_url: &str) -> Result<String, AiError> {
        self.calls
            .lock()
            .unwrap()
            .push((instruction.to_string(), image_url.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = Self::lookup(&self.delays, image_url);
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let fails = self.fail_all
            || self
                .failing
                .lock()
                .unwrap()
                .iter()
                .any(|key| image_url.contains(key.as_str()));
        if fails {
            return Err(AiError::AiApi("service unavailable".to_string()));
        }

        if let Some(response) = Self::lookup(&self.responses, image_url) {
            return Ok(response);
        }
        let default_response = self.default_response.lock().unwrap().clone();
        Ok(default_response
            .unwrap_or_else(|| r#"{"category":"mock","caption":"a mock image"}"#.to_string()))
    }
}

// --- Mock Image Fetcher ---

/// Returns the URL's own bytes as the "image", or fails for registered URLs.
#[derive(Clone, Debug, Default)]
pub struct MockImageFetcher {
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, url_key: &str) {
        self.failing.lock().unwrap().insert(url_key.to_string());
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError> {
        tokio::task::yield_now().await;
        let fails = self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|key| url.contains(key.as_str()));
        if fails {
            return Err(MetadataError::FetchStatus {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(url.as_bytes().to_vec())
    }
}

// --- Mock Tag Decoder ---

/// Returns the same tag tree for every image, or fails for bytes containing "corrupt".
#[derive(Clone, Debug)]
pub struct MockTagDecoder {
    pub tree: RawTagTree,
}

impl MockTagDecoder {
    pub fn new(tree: RawTagTree) -> Self {
        Self { tree }
    }
}

impl TagDecoder for MockTagDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawTagTree, MetadataError> {
        if String::from_utf8_lossy(bytes).contains("corrupt") {
            return Err(MetadataError::Decode(exif::Error::InvalidFormat(
                "corrupt test image",
            )));
        }
        Ok(self.tree.clone())
    }
}

/// A tag tree as a typical mirrorless camera would report it.
pub fn sample_tree() -> RawTagTree {
    RawTagTree {
        focal_length: Some(FocalLengthTag::Number(35.0)),
        f_number: Some(FNumberTag::Rational(28.0, 10.0)),
        iso: Some(IsoTag::Number(400)),
        exposure_time: Some(ExposureTag::Number(0.004)),
        make: Some(TextTag::Text("FUJIFILM".to_string())),
        model: Some(TextTag::Text("X-T4".to_string())),
        lens_model: Some(TextTag::Fragments(vec![
            "XF23mmF1.4".to_string(),
            "R".to_string(),
        ])),
    }
}

//! # Pipeline Tests
//!
//! Drives the per-item analyzer and the batch orchestrator with mock providers,
//! fetchers and decoders to check merging, ordering and failure isolation.

mod common;

use common::{
    sample_tree, setup_tracing, MockAiProvider, MockImageFetcher, MockTagDecoder,
};
use photocap::metadata::{ExifTagDecoder, HttpImageFetcher};
use photocap::{
    parse_concurrency, parse_url_list, run_batch, AiError, AnalysisResult, ImageAnalyzer,
    ImageAnalyzerBuilder, ImageMetadata, ImageSource,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analyzer_with(provider: MockAiProvider, fetcher: MockImageFetcher) -> ImageAnalyzer {
    ImageAnalyzerBuilder::new()
        .ai_provider(Box::new(provider))
        .image_fetcher(Box::new(fetcher))
        .tag_decoder(Box::new(MockTagDecoder::new(sample_tree())))
        .build()
        .expect("analyzer should build")
}

fn sources(count: usize) -> Vec<ImageSource> {
    (0..count)
        .map(|i| ImageSource::from_url(&format!("https://cdn.example.com/photos/img_{i:02}.jpg")))
        .collect()
}

#[test]
fn test_image_source_display_name() {
    let source = ImageSource::from_url("https://cdn.example.com/a/b/sunset.jpg");
    assert_eq!(source.display_name, "sunset.jpg");
    assert_eq!(source.url, "https://cdn.example.com/a/b/sunset.jpg");

    assert_eq!(ImageSource::from_url("plain.jpg").display_name, "plain.jpg");
    assert_eq!(ImageSource::from_url("https://x.com/dir/").display_name, "");
}

#[test]
fn test_parse_url_list_trims_and_skips_blank_lines() {
    let text = "  https://a.com/1.jpg  \n\n\t\nhttps://a.com/2.jpg\r\n   \nhttps://a.com/3.jpg";

    let sources = parse_url_list(text);

    let urls: Vec<&str> = sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://a.com/1.jpg", "https://a.com/2.jpg", "https://a.com/3.jpg"]
    );
    assert_eq!(sources[1].display_name, "2.jpg");
}

#[test]
fn test_parse_concurrency() {
    assert_eq!(parse_concurrency(None), 5);
    assert_eq!(parse_concurrency(Some("")), 5);
    assert_eq!(parse_concurrency(Some("many")), 5);
    assert_eq!(parse_concurrency(Some(" 8 ")), 8);
    assert_eq!(parse_concurrency(Some("0")), 0);
    assert_eq!(parse_concurrency(Some("-2")), -2);
}

#[test]
fn test_builder_requires_provider() {
    let result = ImageAnalyzerBuilder::new().build();
    assert!(matches!(result, Err(AiError::MissingAiProvider)));
}

#[tokio::test]
async fn test_analyze_merges_analysis_metadata_and_defaults() {
    // Arrange
    setup_tracing();
    let provider = MockAiProvider::new().with_default_response(
        "```json\n{\"categories\": [\"city\", \"night\"], \"caption\": \"Luces de la ciudad\", \"footer\": \"Noche en Valpo\", \"footer_en\": \"Night in Valpo\"}\n```",
    );
    let analyzer = analyzer_with(provider.clone(), MockImageFetcher::new());
    let source = ImageSource::from_url("https://cdn.example.com/photos/night.jpg");

    // Act
    let record = analyzer.analyze(source.clone()).await;

    // Assert
    assert_eq!(record.source, source);
    assert_eq!(record.analysis.categories, vec!["city", "night"]);
    assert_eq!(record.analysis.category, "city");
    assert_eq!(record.analysis.caption, "Luces de la ciudad");
    assert_eq!(record.analysis.footer, "Noche en Valpo");
    assert_eq!(record.analysis.footer_en, "Night in Valpo");
    assert_eq!(record.stars, 0);
    assert!(!record.portfolio);
    assert!(record.visible);
    assert_eq!(record.metadata.camera.as_deref(), Some("FUJIFILM X-T4"));
    assert_eq!(record.metadata.aperture, Some(2.8));
    assert_eq!(record.metadata.shutter_speed.as_deref(), Some("1/250s"));

    let calls = provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "https://cdn.example.com/photos/night.jpg");
    assert!(calls[0].0.contains("footer_en"));
}

#[tokio::test]
async fn test_analyze_uses_prompt_override() {
    let provider = MockAiProvider::new();
    let analyzer = ImageAnalyzerBuilder::new()
        .ai_provider(Box::new(provider.clone()))
        .image_fetcher(Box::new(MockImageFetcher::new()))
        .tag_decoder(Box::new(MockTagDecoder::new(sample_tree())))
        .prompt("Describe the image as JSON.")
        .build()
        .unwrap();

    analyzer
        .analyze(ImageSource::from_url("https://cdn.example.com/a.jpg"))
        .await;

    assert_eq!(provider.get_calls()[0].0, "Describe the image as JSON.");
}

#[tokio::test]
async fn test_record_json_shape() {
    let analyzer = analyzer_with(MockAiProvider::new(), MockImageFetcher::new());

    let record = analyzer
        .analyze(ImageSource::from_url("https://cdn.example.com/photos/dog.jpg"))
        .await;
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["url"], "https://cdn.example.com/photos/dog.jpg");
    assert_eq!(value["file"], "dog.jpg");
    assert_eq!(value["category"], "mock");
    assert_eq!(value["categories"], serde_json::json!(["mock"]));
    assert_eq!(value["stars"], 0);
    assert_eq!(value["portfolio"], false);
    assert_eq!(value["visible"], true);
    assert_eq!(value["focal"], "35mm");
    assert_eq!(value["iso"], 400);
    assert_eq!(value["shutterSpeed"], "1/250s");
    assert_eq!(value["lens"], "XF23mmF1.4 R");
}

#[tokio::test]
async fn test_batch_preserves_order_under_reordered_completion() {
    // Arrange
    setup_tracing();
    let provider = MockAiProvider::new();
    let items = sources(8);
    for (i, source) in items.iter().enumerate() {
        provider.add_response(
            &source.display_name,
            &format!("{{\"category\": \"cat-{i}\"}}"),
        );
        // The first items are the slowest, so they complete last.
        provider.delay_for(&source.display_name, Duration::from_millis((8 - i as u64) * 10));
    }
    let analyzer = analyzer_with(provider.clone(), MockImageFetcher::new());

    // Act
    let records = run_batch(&analyzer, &items, 3).await;

    // Assert
    assert_eq!(records.len(), items.len());
    for (i, (record, source)) in records.iter().zip(&items).enumerate() {
        assert_eq!(&record.source, source);
        assert_eq!(record.analysis.category, format!("cat-{i}"));
    }
    assert!(provider.max_in_flight() <= 3);
}

#[tokio::test]
async fn test_fetch_failure_only_affects_its_own_item() {
    // Arrange
    let fetcher = MockImageFetcher::new();
    fetcher.fail_for("img_02.jpg");
    let analyzer = analyzer_with(MockAiProvider::new(), fetcher);
    let items = sources(5);

    // Act
    let records = run_batch(&analyzer, &items, 2).await;

    // Assert
    assert_eq!(records.len(), 5);
    for (i, record) in records.iter().enumerate() {
        if i == 2 {
            assert_eq!(record.metadata, ImageMetadata::default());
            assert_eq!(serde_json::to_value(&record.metadata).unwrap(), serde_json::json!({}));
        } else {
            assert_eq!(record.metadata.camera.as_deref(), Some("FUJIFILM X-T4"));
            assert_eq!(record.metadata.iso, Some(400));
        }
        assert_eq!(record.analysis.category, "mock");
    }
}

#[tokio::test]
async fn test_decode_failure_yields_empty_metadata() {
    let analyzer = analyzer_with(MockAiProvider::new(), MockImageFetcher::new());

    let record = analyzer
        .analyze(ImageSource::from_url("https://cdn.example.com/corrupt.jpg"))
        .await;

    assert!(record.metadata.is_empty());
    assert_eq!(record.analysis.category, "mock");
}

#[tokio::test]
async fn test_provider_outage_degrades_every_record() {
    // Arrange
    setup_tracing();
    let analyzer = analyzer_with(MockAiProvider::failing_all(), MockImageFetcher::new());
    let items = sources(6);

    // Act
    let records = run_batch(&analyzer, &items, 4).await;

    // Assert
    assert_eq!(records.len(), 6);
    for record in &records {
        assert_eq!(record.analysis, AnalysisResult::unavailable());
        assert_eq!(record.analysis.category, "unknown");
        assert!(record.analysis.categories.is_empty());
        assert_eq!(record.analysis.footer, "");
        assert_eq!(record.analysis.footer_en, "");
        // Metadata is unaffected by the provider outage.
        assert_eq!(record.metadata.camera.as_deref(), Some("FUJIFILM X-T4"));
    }
}

#[tokio::test]
async fn test_single_provider_failure_matches_malformed_reply() {
    let provider = MockAiProvider::new();
    provider.fail_for("img_01.jpg");
    provider.add_response("img_03.jpg", "I cannot help with that.");
    let analyzer = analyzer_with(provider, MockImageFetcher::new());

    let records = run_batch(&analyzer, &sources(4), 4).await;

    assert_eq!(records[1].analysis, AnalysisResult::unavailable());
    assert_eq!(records[3].analysis, records[1].analysis);
    assert_eq!(records[0].analysis.category, "mock");
    assert_eq!(records[2].analysis.category, "mock");
}

#[tokio::test]
async fn test_http_fetch_of_missing_image_yields_empty_metadata() {
    // Arrange
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/not-an-image.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"plain text".to_vec()))
        .mount(&server)
        .await;

    let analyzer = ImageAnalyzerBuilder::new()
        .ai_provider(Box::new(MockAiProvider::new()))
        .image_fetcher(Box::new(HttpImageFetcher::default()))
        .tag_decoder(Box::new(ExifTagDecoder))
        .build()
        .unwrap();
    let items = vec![
        ImageSource::from_url(&format!("{}/missing.jpg", server.uri())),
        ImageSource::from_url(&format!("{}/not-an-image.jpg", server.uri())),
    ];

    // Act
    let records = run_batch(&analyzer, &items, 2).await;

    // Assert
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.metadata.is_empty()));
    assert_eq!(records[0].source.display_name, "missing.jpg");
    assert_eq!(records[1].analysis.category, "mock");
}

//! Screen Pipeline Integration Tests
//!
//! Drives the full fetch -> screen -> enrich -> classify -> present flow:
//! 1. Mock listings/metadata sources -> ScreenPipeline
//! 2. ScreenPipeline -> terminal / CSV sinks
//! 3. Config file -> pipeline settings and API key resolution
//!
//! All tests are deterministic (no real network calls) and use mock data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;

use listing_scout::adapters::report::{CsvExporter, TerminalReport, CSV_HEADER};
use listing_scout::application::{PipelineConfig, ScreenOutcome, ScreenPipeline};
use listing_scout::config::{load_config, API_KEY_ENV};
use listing_scout::domain::{CoinInfo, ListingsPage, PotentialTier, RawListing};
use listing_scout::ports::mocks::{MockListings, MockMetadata, RecordingSink};
use listing_scout::ports::{NoticeLevel, ReportSink};

// ============================================================================
// Test Fixtures
// ============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

fn raw_listing(id: u64, hours_ago: i64, market_cap: Value, volume: Value) -> RawListing {
    let added = now() - Duration::hours(hours_ago);
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Token {}", id),
        "symbol": format!("TK{}", id),
        "date_added": added.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "quote": {"USD": {"market_cap": market_cap, "volume_24h": volume}}
    }))
    .unwrap()
}

fn info_entry(twitter: &str, contract: &str) -> CoinInfo {
    CoinInfo::from_value_lossy(json!({
        "urls": {
            "twitter": [twitter],
            "reddit": [],
            "facebook": null,
            "chat": ["https://discord.gg/x"]
        },
        "contract_address": [{"contract_address": contract, "platform": {"name": "Ethereum"}}]
    }))
}

/// Three qualifying listings (5h, 100h, 2h old) plus one too old
fn mixed_page() -> ListingsPage {
    ListingsPage::new(vec![
        raw_listing(10, 5, json!(2_000_000), json!(60_000)),
        raw_listing(20, 100, json!(200_000_000), json!(80_000_000)),
        raw_listing(30, 2, json!(600_000_000), json!(150_000_000)),
        raw_listing(40, 5000, json!(900_000_000), json!(900_000_000)),
    ])
}

fn pipeline(listings: MockListings, metadata: MockMetadata) -> ScreenPipeline<MockListings, MockMetadata> {
    ScreenPipeline::new(PipelineConfig::default(), listings, metadata).unwrap()
}

fn completed(outcome: ScreenOutcome) -> listing_scout::ports::ScreenReport {
    match outcome {
        ScreenOutcome::Completed(report) => report,
        other => panic!("Expected Completed, got {:?}", other),
    }
}

// ============================================================================
// Pipeline Flow
// ============================================================================

#[tokio::test]
async fn test_full_screen_sorted_enriched_classified() {
    let mut info = HashMap::new();
    info.insert("30".to_string(), info_entry("https://twitter.com/tk30", "0x30"));
    info.insert("10".to_string(), info_entry("https://twitter.com/tk10", "0x10"));

    let listings = MockListings::with_page(mixed_page());
    let metadata = MockMetadata::with_entries(info);
    let report = completed(pipeline(listings.clone(), metadata.clone()).run(now()).await);

    let hours: Vec<f64> = report.candidates.iter().map(|c| c.hours_since_added).collect();
    assert_eq!(hours, vec![2.0, 5.0, 100.0]);

    let tiers: Vec<PotentialTier> = report.candidates.iter().map(|c| c.tier()).collect();
    assert_eq!(tiers, vec![PotentialTier::S, PotentialTier::C, PotentialTier::A]);

    let first = &report.candidates[0];
    assert_eq!(first.metadata.twitter.as_deref(), Some("https://twitter.com/tk30"));
    assert_eq!(first.metadata.contract_address.as_deref(), Some("0x30"));
    assert_eq!(first.metadata.reddit, None);
    assert_eq!(first.metadata.facebook, None);
    assert_eq!(first.metadata.telegram, None);

    // No info entry for id 20
    assert!(report.candidates[2].metadata.is_empty());

    assert_eq!(listings.get_calls(), vec![5000]);
    assert_eq!(metadata.get_calls(), vec![vec![30, 10, 20]]);
}

#[tokio::test]
async fn test_info_failure_degrades_to_sentinels() {
    let listings = MockListings::with_page(mixed_page());
    let metadata = MockMetadata::failing_status(429, "{\"status\":{\"error_message\":\"rate limited\"}}");

    let report = completed(pipeline(listings, metadata).run(now()).await);

    assert_eq!(report.candidates.len(), 3);
    for c in &report.candidates {
        assert_eq!(c.metadata.display_fields(), ["N"; 5]);
        assert!(c.potential.is_some());
    }

    let errors: Vec<&str> = report
        .notices
        .iter()
        .filter(|n| n.level == NoticeLevel::Error)
        .map(|n| n.message.as_str())
        .collect();
    assert!(errors.iter().any(|m| m.contains("429")));
    assert!(errors.iter().any(|m| m.contains("rate limited")));
}

#[tokio::test]
async fn test_boundary_values_excluded() {
    let page = ListingsPage::new(vec![
        raw_listing(1, 1, json!(300_000), json!(1_000_000)),
        raw_listing(2, 1, json!(1_000_000), json!(30_000)),
        raw_listing(3, 1, json!(300_000.01), json!(30_000.01)),
    ]);

    let report = completed(
        pipeline(MockListings::with_page(page), MockMetadata::empty())
            .run(now())
            .await,
    );

    let ids: Vec<u64> = report.candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3]);
}

#[tokio::test]
async fn test_old_listing_never_survives() {
    let page = ListingsPage::new(vec![raw_listing(1, 4321, json!(1e12), json!(1e12))]);
    let metadata = MockMetadata::empty();

    let outcome = pipeline(MockListings::with_page(page), metadata.clone())
        .run(now())
        .await;

    assert!(matches!(outcome, ScreenOutcome::NoCandidates(_)));
    assert!(metadata.get_calls().is_empty());
}

#[tokio::test]
async fn test_listings_failure_ends_run() {
    let metadata = MockMetadata::empty();
    let outcome = pipeline(MockListings::failing_transport("connection refused"), metadata.clone())
        .run(now())
        .await;

    let mut sink = RecordingSink::new();
    outcome.present(&mut sink).unwrap();

    assert!(matches!(outcome, ScreenOutcome::FetchFailed { .. }));
    assert!(sink.reports.is_empty());
    assert!(sink.notices.iter().any(|n| n.message.contains("connection refused")));
    assert!(metadata.get_calls().is_empty());
}

#[test]
fn test_pipeline_runs_on_blocking_executor() {
    let outcome = tokio_test::block_on(
        pipeline(MockListings::with_page(mixed_page()), MockMetadata::empty()).run(now()),
    );
    assert_eq!(outcome.report().map(|r| r.candidates.len()), Some(3));
}

// ============================================================================
// Presentation
// ============================================================================

#[tokio::test]
async fn test_terminal_output_highlights_fresh_coins() {
    let report = completed(
        pipeline(MockListings::with_page(mixed_page()), MockMetadata::empty())
            .run(now())
            .await,
    );

    let mut terminal = TerminalReport::new(Vec::new(), false);
    terminal.render(&report).unwrap();
    let text = String::from_utf8(terminal.into_inner()).unwrap();

    assert!(text.contains("Potential tier S (1 coins)"));
    assert!(text.contains("Potential tier A (1 coins)"));
    assert!(text.contains("Potential tier C (1 coins)"));
    assert!(!text.contains("Potential tier B"));
    assert!(text.contains("* 1. Token 30 (TK30)"));
    assert!(text.contains("* 2. Token 10 (TK10)"));
    assert!(text.contains("\n3. Token 20 (TK20)"));
}

#[tokio::test]
async fn test_csv_export_matches_report() {
    let mut info = HashMap::new();
    info.insert("10".to_string(), info_entry("https://twitter.com/tk10", "0x10"));

    let report = completed(
        pipeline(MockListings::with_page(mixed_page()), MockMetadata::with_entries(info))
            .run(now())
            .await,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtered_crypto_data.csv");
    std::fs::write(&path, "old,data\n").unwrap();

    CsvExporter::new(&path).render(&report).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert!(lines[1].starts_with("30,Token 30,TK30,"));
    assert!(lines[1].ends_with(",N,N,N,N,N,S"));
    assert!(lines[2].starts_with("10,Token 10,TK10,"));
    assert!(lines[2].ends_with(",https://twitter.com/tk10,N,N,N,0x10,C"));
    assert!(lines[3].ends_with(",A"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_drives_pipeline_and_env_key_fallback() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[api]
api_key = ""

[screen]
page_limit = 250
max_age_hours = 24.0
min_market_cap = 1000000.0

[report]
highlight_hours = 6.0
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let settings = PipelineConfig::from(&config);
    assert_eq!(settings.page_limit, 250);
    assert_eq!(settings.criteria.max_age_hours, 24.0);
    assert_eq!(settings.criteria.min_market_cap, 1_000_000.0);
    assert_eq!(settings.criteria.min_volume, 30_000.0);
    assert_eq!(settings.highlight_hours, 6.0);

    std::env::set_var(API_KEY_ENV, "env-key-123");
    let client = config.client_config().unwrap();
    assert_eq!(client.api_key, "env-key-123");
    std::env::remove_var(API_KEY_ENV);
}

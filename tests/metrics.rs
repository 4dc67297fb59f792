// tests/metrics.rs
#![cfg(feature = "strict-metrics")]
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use news_radar::ingest::fetch_news;
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::ingest::types::FeedProvider;
use news_radar::metrics::Metrics;
use news_radar::models::Models;
use news_radar::search::semantic_search;

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");
const BROKEN: &str = include_str!("fixtures/broken.xml");

#[tokio::test]
async fn metrics_endpoint_contains_expected_series() {
    let m = Metrics::init(2).expect("recorder");

    let providers: Vec<Box<dyn FeedProvider>> = vec![
        Box::new(RssFeedProvider::from_fixture("https://techcrunch.com/feed/", TC)),
        Box::new(RssFeedProvider::from_fixture("https://broken.example/rss", BROKEN)),
    ];
    let items = fetch_news(&providers, 20).await;
    let _ = semantic_search(&Models::local(), &items, "quantum").await;

    let resp = m
        .router()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "feeds_configured 2",
        "feed_entries_total",
        "feed_errors_total 1",
        "feed_duplicates_total 1",
        "feed_parse_ms",
        "search_requests_total 1",
        "search_fallback_total 1",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}

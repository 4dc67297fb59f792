// tests/providers_http.rs
//
// HTTP feed provider against a local mock server.

use std::time::Duration;

use news_radar::ingest::fetch_news;
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::ingest::types::FeedProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");

async fn server_with_feed() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(TC),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(TC)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn fetches_and_parses_over_http() {
    let server = server_with_feed().await;
    let url = format!("{}/feed/", server.uri());
    let p = RssFeedProvider::from_url(&url, Some(Duration::from_secs(5))).unwrap();

    let entries = p.fetch_entries().await.unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(p.feed_url(), url);
}

#[tokio::test]
async fn http_error_status_is_an_error() {
    let server = server_with_feed().await;
    let p = RssFeedProvider::from_url(&format!("{}/down", server.uri()), None).unwrap();
    assert!(p.fetch_entries().await.is_err());
}

#[tokio::test]
async fn timeout_isolates_a_hung_feed() {
    let server = server_with_feed().await;
    let slow: Box<dyn FeedProvider> = Box::new(
        RssFeedProvider::from_url(
            &format!("{}/slow", server.uri()),
            Some(Duration::from_millis(200)),
        )
        .unwrap(),
    );
    let ok: Box<dyn FeedProvider> = Box::new(
        RssFeedProvider::from_url(&format!("{}/feed/", server.uri()), None).unwrap(),
    );

    let items = fetch_news(&[slow, ok], 20).await;
    assert_eq!(items.len(), 3);
    // Source label includes the mock server's port.
    let host = server.uri().trim_start_matches("http://").to_string();
    assert!(items.iter().all(|i| i.source == host));
}

// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/news (ranked + fallback)
// - GET /          (HTML grid)
// - GET /static/style.css

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use news_radar::api::{create_router, AppState, NewsPage, FALLBACK_ITEMS, FALLBACK_MESSAGE};
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::ingest::types::FeedProvider;
use news_radar::models::Models;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");
const VERGE: &str = include_str!("fixtures/verge_atom.xml");

/// Router over fixture feeds and offline models.
fn test_router() -> Router {
    let providers: Vec<Box<dyn FeedProvider>> = vec![
        Box::new(RssFeedProvider::from_fixture("https://techcrunch.com/feed/", TC)),
        Box::new(RssFeedProvider::from_fixture("https://www.theverge.com/rss/index.xml", VERGE)),
    ];
    create_router(AppState::new(Models::local(), providers, 20))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, String::from_utf8(bytes).expect("utf8"))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let (status, body) = get(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK, "health should be 200");
    assert_eq!(body.trim(), "ok");
}

#[tokio::test]
async fn api_news_ranks_and_filters_by_key_term() {
    let (status, body) = get(test_router(), "/api/news?q=google%20news").await;
    assert_eq!(status, StatusCode::OK);

    let page: NewsPage = serde_json::from_str(&body).expect("json page");
    assert_eq!(page.query, "google news");
    assert!(!page.fallback);
    assert_eq!(page.message, None);
    assert_eq!(page.count, page.items.len());

    let mut titles: Vec<&str> = page.items.iter().map(|c| c.title.as_str()).collect();
    titles.sort();
    assert_eq!(
        titles,
        vec![
            "Google Pixel 9 review: the best Android camera",
            "Google unveils Gemini 2 for developers",
        ]
    );
    for card in &page.items {
        assert!(card.sentiment.is_some());
        assert!(card.event_type.is_some());
        assert!(card.relevance > 0.0);
        // Summaries are tag-free extracts or short originals.
        assert!(!card.summary.contains("<p>"), "summary: {}", card.summary);
    }
}

#[tokio::test]
async fn api_news_without_query_browses_in_feed_order() {
    let (status, body) = get(test_router(), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    let page: NewsPage = serde_json::from_str(&body).unwrap();
    assert_eq!(page.count, 5);
    assert_eq!(page.items[0].title, "Google unveils Gemini 2 for developers");
    assert!(page.items.iter().all(|c| c.relevance == 0.0));
}

#[tokio::test]
async fn api_news_unmatched_query_falls_back_to_general_news() {
    let (status, body) = get(test_router(), "/api/news?q=zebra").await;
    assert_eq!(status, StatusCode::OK);
    let page: NewsPage = serde_json::from_str(&body).unwrap();
    assert!(page.fallback);
    assert_eq!(page.message.as_deref(), Some(FALLBACK_MESSAGE));
    // Only five distinct items exist in the fixtures.
    assert_eq!(page.count, 5.min(FALLBACK_ITEMS));
}

#[tokio::test]
async fn index_renders_escaped_cards() {
    let (status, html) = get(test_router(), "/?q=nvidia").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nvidia posts record quarter on AI chip demand"));
    assert!(html.contains("Found 1 related news items"));
    assert!(html.contains(r#"href="https://techcrunch.com/2024/01/09/nvidia-record/""#));
}

#[tokio::test]
async fn static_css_is_served() {
    let (status, css) = get(test_router(), "/static/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(css.contains(".card"));
}

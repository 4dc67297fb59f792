// tests/e2e_smoke.rs
//
// Fetch -> rank -> enrich -> summarize over the fixture feeds, through the public API.

use news_radar::api::{build_page, AppState};
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::ingest::types::FeedProvider;
use news_radar::models::Models;

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");
const VERGE: &str = include_str!("fixtures/verge_atom.xml");

fn state() -> AppState {
    let providers: Vec<Box<dyn FeedProvider>> = vec![
        Box::new(RssFeedProvider::from_fixture("https://techcrunch.com/feed/", TC)),
        Box::new(RssFeedProvider::from_fixture("https://www.theverge.com/rss/index.xml", VERGE)),
    ];
    AppState::new(Models::local(), providers, 20)
}

#[tokio::test]
async fn smoke_pipeline_for_funding_query() {
    let page = build_page(&state(), "startup funding").await;
    assert!(!page.fallback);
    assert_eq!(page.items.len(), 1);

    let card = &page.items[0];
    assert_eq!(card.title, "Fintech startup raises $50M Series B");
    assert_eq!(card.source, "techcrunch.com");
    assert_eq!(card.image, "https://techcrunch.com/img/fintech.png");
    // Short summaries come back unchanged.
    assert_eq!(card.summary, "The round was led by existing investors.");
    let event = card.event_type.as_ref().expect("event label");
    assert_eq!(event.label, "funding");
}

#[tokio::test]
async fn smoke_pipeline_is_repeatable() {
    let s = state();
    let a = build_page(&s, "nvidia").await;
    let b = build_page(&s, "nvidia").await;
    let ta: Vec<_> = a.items.iter().map(|c| &c.title).collect();
    let tb: Vec<_> = b.items.iter().map(|c| &c.title).collect();
    assert_eq!(ta, tb);
}

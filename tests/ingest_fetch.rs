// tests/ingest_fetch.rs
use news_radar::ingest::fetch_news;
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::ingest::types::{FeedProvider, PLACEHOLDER_IMAGE};

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");
const VERGE: &str = include_str!("fixtures/verge_atom.xml");
const BROKEN: &str = include_str!("fixtures/broken.xml");

fn providers(list: &[(&str, &str)]) -> Vec<Box<dyn FeedProvider>> {
    list.iter()
        .map(|(url, xml)| Box::new(RssFeedProvider::from_fixture(url, xml)) as Box<dyn FeedProvider>)
        .collect()
}

#[tokio::test]
async fn merges_feeds_in_order_and_dedups_titles() {
    let p = providers(&[
        ("https://techcrunch.com/feed/", TC),
        ("https://www.theverge.com/rss/index.xml", VERGE),
    ]);
    let items = fetch_news(&p, 20).await;

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Google unveils Gemini 2 for developers",
            "Nvidia posts record quarter on AI chip demand",
            "Fintech startup raises $50M Series B",
            "Microsoft Copilot update lands in Windows",
            "Google Pixel 9 review: the best Android camera",
        ]
    );

    // First occurrence wins, including its source.
    assert_eq!(items[0].url, "https://techcrunch.com/2024/01/10/google-gemini-2/");
    assert_eq!(items[1].source, "techcrunch.com");
    assert_eq!(items[3].source, "www.theverge.com");
}

#[tokio::test]
async fn images_dates_and_summaries_are_normalized() {
    let p = providers(&[
        ("https://techcrunch.com/feed/", TC),
        ("https://www.theverge.com/rss/index.xml", VERGE),
    ]);
    let items = fetch_news(&p, 20).await;

    assert_eq!(items[0].image, "https://techcrunch.com/img/gemini.jpg");
    assert_eq!(items[1].image, PLACEHOLDER_IMAGE);
    assert_eq!(items[2].image, "https://techcrunch.com/img/fintech.png");
    assert_eq!(items[4].image, "https://www.theverge.com/img/pixel.jpg");

    assert_eq!(items[2].date, "Mon, 08 Jan 2024 09:15:00 GMT");
    assert!(items[0].summary.starts_with("<p>Google said"));
    // Atom content stands in for a missing summary.
    assert!(items[4].summary.contains("Pixel 9 camera"));
}

#[tokio::test]
async fn broken_feed_is_skipped_not_fatal() {
    let p = providers(&[
        ("https://broken.example/rss", BROKEN),
        ("https://www.theverge.com/rss/index.xml", VERGE),
    ]);
    let items = fetch_news(&p, 20).await;
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.source == "www.theverge.com"));
}

#[tokio::test]
async fn per_feed_limit_counts_raw_entries() {
    // The first two raw entries of the TechCrunch fixture are distinct titled items.
    let p = providers(&[("https://techcrunch.com/feed/", TC)]);
    assert_eq!(fetch_news(&p, 2).await.len(), 2);
    // Entries 3 and 4 are a duplicate and an untitled entry.
    assert_eq!(fetch_news(&p, 4).await.len(), 2);
    assert_eq!(fetch_news(&p, 0).await.len(), 0);
}

#[tokio::test]
async fn no_providers_no_items() {
    assert!(fetch_news(&[], 20).await.is_empty());
}

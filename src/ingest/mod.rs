// src/ingest/mod.rs
pub mod parse;
pub mod providers;
pub mod types;

use crate::config::feeds::FeedsConfig;
use crate::ingest::providers::RssFeedProvider;
use crate::ingest::types::{
    FeedEntry, FeedProvider, NewsItem, DEFAULT_DATE, DEFAULT_TITLE, PLACEHOLDER_IMAGE,
};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_entries_total", "Total entries parsed from feeds.");
        describe_counter!("feed_items_kept_total", "Entries kept as news items.");
        describe_counter!(
            "feed_duplicates_total",
            "Entries dropped because their title was already seen in the batch."
        );
        describe_counter!("feed_errors_total", "Feed fetch/parse errors.");
        describe_histogram!("feed_fetch_ms", "Feed HTTP fetch time in milliseconds.");
        describe_histogram!("feed_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!("feed_last_run_ts", "Unix ts when feeds were last polled.");
        describe_gauge!("feeds_configured", "Number of configured feed URLs.");
        describe_counter!("search_requests_total", "Semantic search invocations.");
        describe_counter!(
            "search_fallback_total",
            "Searches where the key-term filter emptied results and title matches were used."
        );
        describe_counter!(
            "summarize_fallback_total",
            "Summaries replaced by word truncation after an extraction error."
        );
    });
}

/// Host component of a feed URL, used as the item's source label.
pub fn source_from_url(feed_url: &str) -> String {
    url::Url::parse(feed_url)
        .ok()
        .and_then(|u| {
            u.host_str().map(|h| match u.port() {
                Some(p) => format!("{h}:{p}"),
                None => h.to_string(),
            })
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

/// First media content url; else first image enclosure; else the placeholder.
///
/// When media content is present its first url is authoritative, even if missing.
pub fn pick_image(entry: &FeedEntry) -> String {
    let found = if let Some(first) = entry.media_content.first() {
        first.clone()
    } else {
        entry
            .enclosures
            .iter()
            .find(|e| {
                e.mime_type
                    .as_deref()
                    .is_some_and(|t| t.starts_with("image"))
            })
            .and_then(|e| e.url.clone())
    };
    match found {
        Some(u) if !u.is_empty() => u,
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Apply field defaults to a raw entry.
pub fn entry_to_item(entry: FeedEntry, source: &str) -> NewsItem {
    let image = pick_image(&entry);
    NewsItem {
        title: entry.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        summary: entry.summary.unwrap_or_default(),
        date: entry.published.unwrap_or_else(|| DEFAULT_DATE.to_string()),
        url: entry.link.unwrap_or_default(),
        image,
        source: source.to_string(),
        sentiment: None,
        event_type: None,
        relevance: 0.0,
        is_latest: false,
    }
}

/// Poll every provider in order and merge into one batch.
///
/// - A failing feed is logged and skipped; the batch never fails as a whole.
/// - At most `per_feed_limit` entries are considered per feed.
/// - Titles are unique within the batch (first one wins); entries whose
///   title is missing are dropped.
pub async fn fetch_news(
    providers: &[Box<dyn FeedProvider>],
    per_feed_limit: usize,
) -> Vec<NewsItem> {
    ensure_metrics_described();

    let mut items = Vec::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut duplicates = 0u64;

    for p in providers {
        let entries = match p.fetch_entries().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(target: "ingest", feed = p.feed_url(), error = ?e, "feed error");
                counter!("feed_errors_total").increment(1);
                continue;
            }
        };

        let source = source_from_url(p.feed_url());
        let before = items.len();
        for entry in entries.into_iter().take(per_feed_limit) {
            let item = entry_to_item(entry, &source);
            if item.title == DEFAULT_TITLE {
                continue;
            }
            if !seen_titles.insert(item.title.clone()) {
                duplicates += 1;
                continue;
            }
            items.push(item);
        }
        tracing::debug!(
            target: "ingest",
            feed = p.feed_url(),
            kept = items.len() - before,
            "feed polled"
        );
    }

    counter!("feed_items_kept_total").increment(items.len() as u64);
    counter!("feed_duplicates_total").increment(duplicates);
    gauge!("feed_last_run_ts").set(chrono::Utc::now().timestamp() as f64);

    tracing::info!(
        target: "ingest",
        feeds = providers.len(),
        items = items.len(),
        duplicates,
        "feeds polled"
    );
    items
}

/// HTTP providers for every configured feed URL, in config order.
pub fn build_providers(cfg: &FeedsConfig) -> Vec<Box<dyn FeedProvider>> {
    let timeout = cfg.fetch_timeout();
    let mut out: Vec<Box<dyn FeedProvider>> = Vec::with_capacity(cfg.feeds.len());
    for url in &cfg.feeds {
        match RssFeedProvider::from_url(url, timeout) {
            Ok(p) => out.push(Box::new(p)),
            Err(e) => tracing::warn!(target: "ingest", feed = %url, error = ?e, "skipping feed"),
        }
    }
    out
}

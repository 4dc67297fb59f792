// src/enrich.rs
//! Per-item enrichment: sentiment, top event type, relevance and recency.

use time::OffsetDateTime;

use crate::ingest::types::{Labeled, NewsItem};
use crate::models::Models;
use crate::relevance::{self, round2};

/// Classifier input is capped at this many characters of `title + " " + summary`.
pub const MAX_CLASSIFIER_CHARS: usize = 512;

/// Closed label set for event categorization.
pub const EVENT_LABELS: [&str; 16] = [
    "layoffs",
    "funding",
    "product launch",
    "acquisition",
    "partnership",
    "regulation",
    "ai innovation",
    "cybersecurity",
    "startup news",
    "tech mergers",
    "policy changes",
    "breakthroughs",
    "market trends",
    "microsoft news",
    "general tech updates",
    "google news",
];

fn rounded(l: Labeled) -> Labeled {
    Labeled {
        label: l.label,
        score: round2(l.score),
    }
}

/// Attach sentiment, event type, relevance (rounded) and the latest flag.
///
/// A failing classifier leaves its field `None`; relevance and recency are always set.
pub async fn enrich_at(
    models: &Models,
    mut item: NewsItem,
    query: &str,
    now: OffsetDateTime,
) -> NewsItem {
    let text: String = item.text().chars().take(MAX_CLASSIFIER_CHARS).collect();

    item.sentiment = match models.sentiment.classify(&text).await {
        Ok(l) => Some(rounded(l)),
        Err(e) => {
            tracing::warn!(target: "models", error = ?e, "sentiment classification failed");
            None
        }
    };

    item.event_type = match models.zero_shot.classify(&text, &EVENT_LABELS).await {
        Ok(out) => out.top().map(rounded),
        Err(e) => {
            tracing::warn!(target: "models", error = ?e, "event classification failed");
            None
        }
    };

    item.relevance = round2(relevance::score_at(&item, query, now));
    item.is_latest = relevance::is_latest_at(&item.date, now);
    tracing::debug!(
        target: "relevance",
        title = %item.title,
        relevance = item.relevance,
        boosts = ?relevance::explain_at(&item, query, now),
        "scored item"
    );
    item
}

pub async fn enrich(models: &Models, item: NewsItem, query: &str) -> NewsItem {
    enrich_at(models, item, query, OffsetDateTime::now_utc()).await
}

/// Enrich sequentially, preserving order.
pub async fn enrich_all(
    models: &Models,
    items: Vec<NewsItem>,
    query: &str,
    now: OffsetDateTime,
) -> Vec<NewsItem> {
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        out.push(enrich_at(models, it, query, now).await);
    }
    out
}

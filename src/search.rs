// src/search.rs
//! Semantic ranking of a fetched batch against a free-text query.
//!
//! Order of operations for a query of 2+ characters:
//! 1) cosine(query, title+summary) + 0.4 × keyword relevance, stable sort desc, top 10
//! 2) strict key-term filter (title contains it, or summary contains it more than once);
//!    if that empties the list, up to 5 items from the whole batch with the term in the title
//! 3) enrichment, then a stable re-sort by (relevance, is_latest) desc.
//!
//! Step 3 can move an item above one with a higher combined score. That ordering is
//! observed behavior and kept as is.

use metrics::counter;
use time::OffsetDateTime;

use crate::enrich::enrich_all;
use crate::ingest::types::NewsItem;
use crate::models::Models;
use crate::relevance::{self, extract_key_term, query_tokens};
use crate::similarity::cosine_scores;

pub const TOP_K: usize = 10;
pub const MIN_QUERY_CHARS: usize = 2;
pub const RELEVANCE_WEIGHT: f32 = 0.4;
pub const TITLE_FALLBACK_CAP: usize = 5;

/// Rank, filter and enrich `items` for `query`; at most [`TOP_K`] results.
pub async fn semantic_search(models: &Models, items: &[NewsItem], query: &str) -> Vec<NewsItem> {
    semantic_search_at(models, items, query, OffsetDateTime::now_utc()).await
}

pub async fn semantic_search_at(
    models: &Models,
    items: &[NewsItem],
    query: &str,
    now: OffsetDateTime,
) -> Vec<NewsItem> {
    counter!("search_requests_total").increment(1);
    let query = query.trim();

    if query.chars().count() < MIN_QUERY_CHARS {
        // Browse mode: first items in feed order, enriched, never re-sorted.
        let head = items.iter().take(TOP_K).cloned().collect();
        return enrich_all(models, head, query, now).await;
    }

    let ranked = rank_by_combined_score(models, items, query, now).await;
    let filtered = match extract_key_term(query) {
        Some(term) => {
            let kept = key_term_filter(ranked, &term);
            if kept.is_empty() {
                counter!("search_fallback_total").increment(1);
                tracing::debug!(target: "search", "key-term filter emptied results; title fallback");
                title_fallback(items, &term)
            } else {
                kept
            }
        }
        None => ranked,
    };

    let mut results = enrich_all(models, filtered, query, now).await;
    results.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then(b.is_latest.cmp(&a.is_latest))
    });
    results
}

/// Top [`TOP_K`] by `cosine + 0.4 × relevance`. Falls back to keyword ranking when
/// the embedder fails.
async fn rank_by_combined_score(
    models: &Models,
    items: &[NewsItem],
    query: &str,
    now: OffsetDateTime,
) -> Vec<NewsItem> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut texts: Vec<String> = items.iter().map(NewsItem::text).collect();
    texts.push(query.to_string());

    let mut vectors = match models.embedder.embed(&texts).await {
        Ok(v) if v.len() == texts.len() => v,
        Ok(v) => {
            tracing::warn!(
                target: "search",
                got = v.len(),
                want = texts.len(),
                "embedder returned wrong count; keyword ranking"
            );
            return keyword_fallback(items, query).into_iter().take(TOP_K).collect();
        }
        Err(e) => {
            tracing::warn!(target: "search", error = ?e, "embedding failed; keyword ranking");
            return keyword_fallback(items, query).into_iter().take(TOP_K).collect();
        }
    };
    let query_vec = vectors.pop().unwrap_or_default();
    let sims = cosine_scores(&query_vec, &vectors);

    let mut scored: Vec<(&NewsItem, f32)> = items
        .iter()
        .zip(sims)
        .map(|(it, sim)| (it, sim + relevance::score_at(it, query, now) * RELEVANCE_WEIGHT))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(TOP_K)
        .map(|(it, _)| it.clone())
        .collect()
}

/// Keep items whose title contains `term`, or whose summary contains it more than once.
pub fn key_term_filter(items: Vec<NewsItem>, term: &str) -> Vec<NewsItem> {
    let term = term.to_lowercase();
    items
        .into_iter()
        .filter(|it| {
            it.title.to_lowercase().contains(&term)
                || it.summary.to_lowercase().matches(term.as_str()).count() > 1
        })
        .collect()
}

/// Up to [`TITLE_FALLBACK_CAP`] items, in batch order, whose title contains `term`.
pub fn title_fallback(items: &[NewsItem], term: &str) -> Vec<NewsItem> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|it| it.title.to_lowercase().contains(&term))
        .take(TITLE_FALLBACK_CAP)
        .cloned()
        .collect()
}

/// Keyword-only ranking: distinct query tokens found in the text, doubled when both
/// query and text mention "google". Stable sort desc; nothing is dropped.
pub fn keyword_fallback(items: &[NewsItem], query: &str) -> Vec<NewsItem> {
    let tokens = query_tokens(query);
    let query_lower = query.to_lowercase();
    let mut scored: Vec<(&NewsItem, usize)> = items
        .iter()
        .map(|it| {
            let text = it.text().to_lowercase();
            let matches = tokens.iter().filter(|t| text.contains(t.as_str())).count();
            let boost = if query_lower.contains("google") && text.contains("google") {
                2
            } else {
                1
            };
            (it, matches * boost)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(it, _)| it.clone()).collect()
}

// src/relevance.rs
//! Keyword relevance: query tokenizer, multiplicative boost chain, recency window
//! and key-term extraction.
//!
//! The score is `matches × boost`, where `matches` counts distinct query tokens that
//! occur (as substrings) in the lowercased `title + " " + summary` and `boost` is the
//! product of every [`BoostRule`] whose predicate holds, applied in [`BOOST_RULES`] order.
//! The ranker blends this with cosine similarity, so the magnitudes matter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use time::{format_description::well_known::Rfc2822, Duration, OffsetDateTime};

use crate::ingest::types::NewsItem;

/// Items published within this window count as "latest".
pub const RECENT_WINDOW: Duration = Duration::hours(24);

/// Words never chosen as the query's key term.
pub const KEY_TERM_STOP_WORDS: &[&str] =
    &["what", "is", "the", "latest", "news", "about", "on", "for"];

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("word regex"));

/// Word-boundary tokens, lowercased, in order (duplicates kept).
pub fn tokenize(input: &str) -> Vec<String> {
    let lower = input.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct lowercased query tokens.
pub fn query_tokens(query: &str) -> BTreeSet<String> {
    tokenize(query).into_iter().collect()
}

/// Parse a feed timestamp (RFC 2822, e.g. `Mon, 15 Jan 2024 10:00:00 +0000`).
pub fn parse_pub_date(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc2822).ok()
}

/// True iff the date parses and lies after `now - 24h`. Unparseable dates are never latest.
pub fn is_latest_at(raw_date: &str, now: OffsetDateTime) -> bool {
    parse_pub_date(raw_date).is_some_and(|d| d > now - RECENT_WINDOW)
}

/// Everything a boost predicate may look at.
pub struct BoostContext<'a> {
    pub query_lower: &'a str,
    pub tokens: &'a BTreeSet<String>,
    pub title_lower: &'a str,
    pub text_lower: &'a str,
    pub raw_date: &'a str,
    pub now: OffsetDateTime,
}

/// One step of the boost chain.
pub struct BoostRule {
    pub name: &'static str,
    pub multiplier: f32,
    pub applies: fn(&BoostContext<'_>) -> bool,
}

fn title_match(c: &BoostContext<'_>) -> bool {
    c.tokens.iter().any(|t| c.title_lower.contains(t.as_str()))
}

fn google_in_both(c: &BoostContext<'_>) -> bool {
    c.query_lower.contains("google") && c.text_lower.contains("google")
}

fn fresh_for_latest_query(c: &BoostContext<'_>) -> bool {
    (c.query_lower.contains("latest") || c.query_lower.contains("news"))
        && is_latest_at(c.raw_date, c.now)
}

/// Applied strictly in this order. Do not fold into a weighted sum.
pub const BOOST_RULES: &[BoostRule] = &[
    BoostRule {
        name: "title_match",
        multiplier: 1.5,
        applies: title_match,
    },
    BoostRule {
        name: "google",
        multiplier: 1.5,
        applies: google_in_both,
    },
    BoostRule {
        name: "recent_for_latest_query",
        multiplier: 1.2,
        applies: fresh_for_latest_query,
    },
];

/// Relevance of `item` to `query` as of `now`. 0.0 for an empty query.
pub fn score_at(item: &NewsItem, query: &str, now: OffsetDateTime) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let query_lower = query.to_lowercase();
    let tokens = query_tokens(query);
    let text_lower = item.text().to_lowercase();
    let title_lower = item.title.to_lowercase();

    let matches = tokens
        .iter()
        .filter(|t| text_lower.contains(t.as_str()))
        .count();

    let ctx = BoostContext {
        query_lower: &query_lower,
        tokens: &tokens,
        title_lower: &title_lower,
        text_lower: &text_lower,
        raw_date: &item.date,
        now,
    };
    let boost = BOOST_RULES
        .iter()
        .filter(|r| (r.applies)(&ctx))
        .fold(1.0_f32, |acc, r| acc * r.multiplier);

    matches as f32 * boost
}

/// Names of the boost rules that fired, in evaluation order.
pub fn explain_at(item: &NewsItem, query: &str, now: OffsetDateTime) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    let tokens = query_tokens(query);
    let text_lower = item.text().to_lowercase();
    let title_lower = item.title.to_lowercase();
    let ctx = BoostContext {
        query_lower: &query_lower,
        tokens: &tokens,
        title_lower: &title_lower,
        text_lower: &text_lower,
        raw_date: &item.date,
        now,
    };
    BOOST_RULES
        .iter()
        .filter(|r| (r.applies)(&ctx))
        .map(|r| r.name)
        .collect()
}

/// First query token that is not a stop word, e.g. "google" for "google news".
pub fn extract_key_term(query: &str) -> Option<String> {
    tokenize(query)
        .into_iter()
        .find(|w| !KEY_TERM_STOP_WORDS.contains(&w.as_str()))
}

/// Round to 2 decimals.
pub fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

/* ----------------------------
Tests
---------------------------- */

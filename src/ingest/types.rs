// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Placeholder image used when an entry carries no usable media.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
/// Title given to entries without one; such entries are never kept.
pub const DEFAULT_TITLE: &str = "No Title";
/// Date given to entries without one; never parses, so never "latest".
pub const DEFAULT_DATE: &str = "No date";

/// A top label from a classifier, score rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Labeled {
    pub label: String,
    pub score: f32,
}

/// One normalized news entry. Created fresh on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,   // dedup key within a batch
    pub summary: String, // raw, may carry HTML
    pub date: String,    // raw feed timestamp (RFC 2822-ish), may not parse
    pub url: String,
    pub image: String,
    pub source: String, // feed host

    // Attached by enrichment; never persisted.
    #[serde(default)]
    pub sentiment: Option<Labeled>,
    #[serde(default)]
    pub event_type: Option<Labeled>,
    #[serde(default)]
    pub relevance: f32,
    #[serde(default)]
    pub is_latest: bool,
}

impl NewsItem {
    /// Bare item with defaults for every optional field; handy for tests and fixtures.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            date: DEFAULT_DATE.to_string(),
            url: String::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
            source: "Unknown".to_string(),
            sentiment: None,
            event_type: None,
            relevance: 0.0,
            is_latest: false,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// `title + " " + summary`, the text every model and scorer looks at.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// A feed endpoint that yields raw entries.
#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>>;
    /// The configured feed URL (used for the source label and logs).
    fn feed_url(&self) -> &str;
}

/// Entry as parsed from the feed, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub link: Option<String>,
    /// `media:content` elements, in document order; the url may be absent.
    pub media_content: Vec<Option<String>>,
    pub enclosures: Vec<Enclosure>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enclosure {
    pub url: Option<String>,
    pub mime_type: Option<String>,
}

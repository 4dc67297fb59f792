// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Duration;

use crate::ingest::parse::parse_feed;
use crate::ingest::types::{FeedEntry, FeedProvider};

/// RSS/Atom provider backed either by an HTTP endpoint or by an in-memory document.
pub struct RssFeedProvider {
    url: String,
    mode: Mode,
}

enum Mode {
    // Own copy so tests don't need 'static fixtures.
    Fixture(String),
    Http { client: reqwest::Client },
}

impl RssFeedProvider {
    /// Serve `xml` as if it had been fetched from `url`.
    pub fn from_fixture(url: &str, xml: &str) -> Self {
        Self {
            url: url.to_string(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    /// Fetch over HTTP. `timeout` of `None` means no request timeout at all.
    pub fn from_url(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent("news-radar/0.1 (+rss reader)")
            .connect_timeout(Duration::from_secs(5));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("building feed http client")?;
        Ok(Self::with_client(url, client))
    }

    /// Fetch over HTTP with a caller-provided client.
    pub fn with_client(url: &str, client: reqwest::Client) -> Self {
        Self {
            url: url.to_string(),
            mode: Mode::Http { client },
        }
    }

    fn parse_timed(&self, xml: &str) -> Result<Vec<FeedEntry>> {
        let t0 = std::time::Instant::now();
        let entries =
            parse_feed(xml).with_context(|| format!("parsing feed xml from {}", self.url))?;
        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_entries_total").increment(entries.len() as u64);
        Ok(entries)
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        match &self.mode {
            Mode::Fixture(xml) => self.parse_timed(xml),
            Mode::Http { client } => {
                let t0 = std::time::Instant::now();
                let resp = client
                    .get(&self.url)
                    .send()
                    .await
                    .with_context(|| format!("GET {}", self.url))?
                    .error_for_status()
                    .with_context(|| format!("GET {} status", self.url))?;
                let body = resp.text().await.context("feed http .text()")?;
                histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                self.parse_timed(&body)
            }
        }
    }

    fn feed_url(&self) -> &str {
        &self.url
    }
}

// src/config/feeds.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_FEEDS_PATH: &str = "NEWS_FEEDS_PATH";

pub const DEFAULT_PER_FEED_LIMIT: usize = 20;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Built-in tech feeds, polled in this order.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://techcrunch.com/feed/",
    "https://www.theverge.com/rss/index.xml",
    "https://www.wired.com/feed/rss",
    "https://feeds.arstechnica.com/arstechnica/index",
    "https://www.reuters.com/rssfeeds/technologyNews",
    "https://feeds.feedburner.com/venturebeat/SZYF",
    "https://www.bloomberg.com/feeds/technology.rss",
    "https://rss.cnn.com/rss/edition_technology.rss",
    "https://feeds.feedburner.com/MicrosoftResearch",
    "https://www.zdnet.com/news/rss.xml",
    "https://news.microsoft.com/feed/",
    "https://news.google.com/rss",
    "https://www.androidpolice.com/feed/",
    "https://searchengineland.com/feed/",
];

fn default_per_feed_limit() -> usize {
    DEFAULT_PER_FEED_LIMIT
}
fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedsConfig {
    pub feeds: Vec<String>,
    /// Entries considered per feed.
    #[serde(default = "default_per_feed_limit")]
    pub per_feed_limit: usize,
    /// Per-request timeout. 0 disables it: a hung feed then stalls the whole poll.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
            per_feed_limit: DEFAULT_PER_FEED_LIMIT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl FeedsConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_secs > 0).then(|| Duration::from_secs(self.fetch_timeout_secs))
    }
}

/// Load feed config from an explicit path. Supports TOML or JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<FeedsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feeds config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load feed config using env var + fallbacks:
/// 1) $NEWS_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in defaults
pub fn load_feeds_default() -> Result<FeedsConfig> {
    if let Ok(p) = std::env::var(ENV_FEEDS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("{ENV_FEEDS_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(FeedsConfig::default())
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<FeedsConfig> {
    let mut cfg: FeedsConfig = if hint_ext == "json" {
        parse_json(s)?
    } else {
        match toml::from_str(s) {
            Ok(v) => v,
            Err(toml_err) => parse_json(s).map_err(|_| anyhow!(toml_err))?,
        }
    };
    cfg.feeds = clean_list(cfg.feeds);
    if cfg.feeds.is_empty() {
        return Err(anyhow!("feeds config lists no feeds"));
    }
    Ok(cfg)
}

fn parse_json(s: &str) -> Result<FeedsConfig> {
    // Either the full object or a bare array of URLs.
    if let Ok(v) = serde_json::from_str::<FeedsConfig>(s) {
        return Ok(v);
    }
    let feeds: Vec<String> = serde_json::from_str(s).context("unsupported feeds format")?;
    Ok(FeedsConfig {
        feeds,
        ..FeedsConfig::default()
    })
}

/// Trim, drop empties, dedup while keeping the first position of each URL.
fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && seen.insert(t.to_string()) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_formats_work() {
        let toml = r#"
feeds = [" https://a.example/rss ", "", "https://b.example/rss", "https://a.example/rss"]
per_feed_limit = 5
"#;
        let cfg = parse_feeds(toml, "toml").unwrap();
        assert_eq!(
            cfg.feeds,
            vec!["https://a.example/rss".to_string(), "https://b.example/rss".to_string()]
        );
        assert_eq!(cfg.per_feed_limit, 5);
        assert_eq!(cfg.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);

        let json = r#"["https://c.example/feed", "  "]"#;
        let cfg = parse_feeds(json, "json").unwrap();
        assert_eq!(cfg.feeds, vec!["https://c.example/feed".to_string()]);
        assert_eq!(cfg.per_feed_limit, DEFAULT_PER_FEED_LIMIT);
    }

    #[test]
    fn empty_feed_list_is_rejected() {
        assert!(parse_feeds(r#"feeds = []"#, "toml").is_err());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = FeedsConfig {
            fetch_timeout_secs: 0,
            ..FeedsConfig::default()
        };
        assert_eq!(cfg.fetch_timeout(), None);
        assert_eq!(FeedsConfig::default().feeds.len(), 14);
    }
}

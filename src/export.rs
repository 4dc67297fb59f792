// src/export.rs
//! Batch export of summarized titles to CSV and keyword lookup over that file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ingest::types::FeedProvider;
use crate::summarize::summarize;

pub const DEFAULT_EXPORT_FEED: &str = "https://techcrunch.com/feed/";
pub const DEFAULT_EXPORT_PATH: &str = "tech_news.csv";
/// Titles read from the feed before summarizing.
pub const MAX_TITLES: usize = 30;
pub const DEFAULT_EXPORT_LIMIT: usize = 10;
pub const MAX_ANSWERS: usize = 5;
pub const NO_MATCH: &str = "No matching news found.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub title: String,
    pub summary: String,
}

/// Fetch up to [`MAX_TITLES`] titles, summarize the first `limit`, write them to `out`.
pub async fn export_titles(
    provider: &dyn FeedProvider,
    limit: usize,
    out: &Path,
) -> Result<Vec<ExportRow>> {
    let entries = provider
        .fetch_entries()
        .await
        .with_context(|| format!("fetching {}", provider.feed_url()))?;

    let rows: Vec<ExportRow> = entries
        .into_iter()
        .take(MAX_TITLES)
        .filter_map(|e| e.title)
        .take(limit)
        .map(|title| {
            let summary = summarize(&title);
            ExportRow { title, summary }
        })
        .collect();

    write_rows(out, &rows)?;
    tracing::info!(rows = rows.len(), path = %out.display(), "export written");
    Ok(rows)
}

pub fn write_rows(out: &Path, rows: &[ExportRow]) -> Result<()> {
    let mut w = csv::Writer::from_path(out)
        .with_context(|| format!("creating {}", out.display()))?;
    for row in rows {
        w.serialize(row)?;
    }
    // Header-only file when there is nothing to export.
    if rows.is_empty() {
        w.write_record(["title", "summary"])?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_rows(path: &Path) -> Result<Vec<ExportRow>> {
    let mut r = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for rec in r.deserialize::<ExportRow>() {
        rows.push(rec.with_context(|| format!("reading {}", path.display()))?);
    }
    Ok(rows)
}

/// Titles of rows where any lowercased question word is a substring of
/// `title + " " + summary`, at most [`MAX_ANSWERS`].
pub fn matching_titles<'a>(rows: &'a [ExportRow], question: &str) -> Vec<&'a str> {
    let question = question.to_lowercase();
    let words: Vec<&str> = question.split_whitespace().collect();
    rows.iter()
        .filter(|row| {
            let hay = format!("{} {}", row.title, row.summary).to_lowercase();
            words.iter().any(|w| hay.contains(w))
        })
        .take(MAX_ANSWERS)
        .map(|row| row.title.as_str())
        .collect()
}

/// Matching titles joined by newlines, or [`NO_MATCH`].
pub fn find_answer(csv_path: &Path, question: &str) -> Result<String> {
    let rows = read_rows(csv_path)?;
    let hits = matching_titles(&rows, question);
    if hits.is_empty() {
        Ok(NO_MATCH.to_string())
    } else {
        Ok(hits.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: &str, s: &str) -> ExportRow {
        ExportRow {
            title: t.into(),
            summary: s.into(),
        }
    }

    #[test]
    fn any_question_word_matches_substring() {
        let rows = vec![
            row("Nvidia earnings", "chips"),
            row("Apple event", "iPhone launch"),
            row("Weather", "sunny"),
        ];
        assert_eq!(matching_titles(&rows, "What about CHIPS"), vec!["Nvidia earnings"]);
        assert_eq!(
            matching_titles(&rows, "sun event"),
            vec!["Apple event", "Weather"]
        );
    }

    #[test]
    fn caps_at_five() {
        let rows: Vec<_> = (0..9).map(|i| row(&format!("AI story {i}"), "")).collect();
        assert_eq!(matching_titles(&rows, "ai").len(), MAX_ANSWERS);
    }
}

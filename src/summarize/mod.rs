// src/summarize/mod.rs
//! Extractive summarizer with a deterministic truncation fallback.
//!
//! `summarize` never fails: short input comes back untouched, LSA errors are
//! replaced by the first 100 words of the tag-stripped text.

pub mod lsa;
pub mod tokenizer;

use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;

/// Inputs with fewer whitespace-separated words than this are returned unchanged.
pub const MIN_WORDS: usize = 8;
/// Number of sentences in an extract.
pub const SENTENCES: usize = 2;
/// Word cap of the truncation fallback.
pub const FALLBACK_WORDS: usize = 100;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

/// Remove anything that looks like an HTML tag. Non-validating.
pub fn strip_html(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// First [`FALLBACK_WORDS`] words joined by spaces plus `...` when the cap was reached;
/// otherwise the text as given.
pub fn truncate_fallback(clean_text: &str) -> String {
    let words: Vec<&str> = clean_text.split_whitespace().take(FALLBACK_WORDS).collect();
    if words.len() == FALLBACK_WORDS {
        format!("{}...", words.join(" "))
    } else {
        clean_text.to_string()
    }
}

pub fn summarize(text: &str) -> String {
    if text.split_whitespace().count() < MIN_WORDS {
        return text.to_string();
    }

    let clean = strip_html(text);
    match lsa::extract(&clean, SENTENCES) {
        Ok(sentences) => sentences.join(" "),
        Err(e) => {
            counter!("summarize_fallback_total").increment(1);
            tracing::debug!(target: "summarize", error = %e, "extract failed; truncating");
            truncate_fallback(&clean)
        }
    }
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_returned_unchanged() {
        let s = "AI chips beat expectations this quarter again";
        assert_eq!(summarize(s), s);
        assert_eq!(summarize(""), "");
        // Tags are not stripped below the threshold.
        assert_eq!(summarize("<b>Hi</b> there"), "<b>Hi</b> there");
    }

    #[test]
    fn long_text_yields_two_sentences_without_tags() {
        let text = "<p>Google released a new Gemini model for developers today.</p> \
                    <p>The Gemini model improves coding and reasoning for developers.</p> \
                    <p>Lunch was served at noon.</p>";
        let out = summarize(text);
        assert!(!out.contains('<'));
        assert!(out.contains("Gemini"));
        assert_eq!(out.matches('.').count(), 2);
    }

    #[test]
    fn malformed_html_never_panics() {
        let inputs = [
            "<div <span>> unclosed <a href='x' words words words words words words",
            "<<<<>>>> one two three four five six seven eight nine",
            "text with < lone bracket and more words to cross the eight word line",
        ];
        for input in inputs {
            let _ = summarize(input);
        }
    }

    #[test]
    fn fallback_appends_ellipsis_only_at_cap() {
        let hundred = vec!["w"; 150].join(" ");
        let out = truncate_fallback(&hundred);
        assert!(out.ends_with("..."));
        assert_eq!(out.trim_end_matches("...").split(' ').count(), 100);

        let short = "just  a few   words";
        assert_eq!(truncate_fallback(short), short);
    }

    #[test]
    fn strip_html_removes_tags_only() {
        assert_eq!(strip_html("<p>a <b>b</b></p> c > d"), "a b c > d");
    }
}

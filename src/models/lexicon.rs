// src/models/lexicon.rs
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::ingest::types::Labeled;
use crate::models::SentimentClassifier;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Offline three-class sentiment from a word lexicon with simple negation.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Returns (score, token count).
    /// Negation: a negator within the previous 1..=3 tokens flips the word's sign.
    pub fn score_text(&self, text: &str) -> (i32, usize) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            score += if negated { -base } else { base };
        }

        (score, tokens.len())
    }

    /// Map a lexicon score onto a label and a confidence in 0.5..1.0.
    pub fn label_for(score: i32) -> Labeled {
        let (label, conf) = match score {
            0 => ("neutral", 0.6),
            s => {
                let mag = s.unsigned_abs() as f32;
                let conf = 0.5 + 0.5 * (mag / (mag + 2.0));
                (if s > 0 { "positive" } else { "negative" }, conf)
            }
        };
        Labeled {
            label: label.to_string(),
            score: conf,
        }
    }
}

#[async_trait]
impl SentimentClassifier for LexiconSentiment {
    async fn classify(&self, text: &str) -> Result<Labeled> {
        let (score, _) = self.score_text(text);
        Ok(Self::label_for(score))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// Alphanumeric tokens (apostrophes kept, so "isn't" survives), lowercased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
            | "fails"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_words() {
        let s = LexiconSentiment::new();
        assert!(s.score_text("Startup raises record funding, shares surge").0 > 0);
        assert!(s.score_text("Company announces layoffs after data breach").0 < 0);
    }

    #[test]
    fn negation_flips_sign() {
        let s = LexiconSentiment::new();
        let (plain, _) = s.score_text("the launch was a success");
        let (neg, _) = s.score_text("the launch was not a success");
        assert!(plain > 0);
        assert_eq!(neg, -plain);
    }

    #[test]
    fn labels_and_confidence() {
        assert_eq!(LexiconSentiment::label_for(0).label, "neutral");
        let pos = LexiconSentiment::label_for(2);
        assert_eq!(pos.label, "positive");
        assert!((pos.score - 0.75).abs() < 1e-6);
        assert_eq!(LexiconSentiment::label_for(-1).label, "negative");
    }
}

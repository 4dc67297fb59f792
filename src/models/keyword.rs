// src/models/keyword.rs
//! Keyword-driven stand-in for zero-shot classification.
//!
//! Each candidate label gets `hits` = occurrences of its cue words in the text
//! (label words themselves always count as cues). Scores are a softmax over hits,
//! so they sum to 1 across the candidates like a single-label NLI classifier.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ZeroShotClassifier, ZeroShotOutput};
use crate::relevance::tokenize;

struct LabelCues {
    label: &'static str,
    cues: &'static [&'static str],
}

const LABEL_CUES: &[LabelCues] = &[
    LabelCues { label: "layoffs", cues: &["layoff", "layoffs", "job", "jobs", "cuts", "fired", "workforce", "staff"] },
    LabelCues { label: "funding", cues: &["funding", "raises", "raised", "series", "investors", "valuation", "seed", "round"] },
    LabelCues { label: "product launch", cues: &["launch", "launches", "unveils", "announces", "release", "releases", "new", "available"] },
    LabelCues { label: "acquisition", cues: &["acquire", "acquires", "acquired", "acquisition", "buy", "buys", "deal"] },
    LabelCues { label: "partnership", cues: &["partner", "partners", "partnership", "collaboration", "teams", "alliance"] },
    LabelCues { label: "regulation", cues: &["regulator", "regulators", "law", "rules", "antitrust", "fine", "ftc", "eu", "compliance"] },
    LabelCues { label: "ai innovation", cues: &["ai", "model", "models", "llm", "gpt", "gemini", "openai", "neural", "machine", "learning"] },
    LabelCues { label: "cybersecurity", cues: &["security", "breach", "hack", "hackers", "ransomware", "vulnerability", "malware", "attack"] },
    LabelCues { label: "startup news", cues: &["startup", "startups", "founder", "founders", "accelerator", "yc"] },
    LabelCues { label: "tech mergers", cues: &["merger", "merge", "merges", "combine", "consolidation"] },
    LabelCues { label: "policy changes", cues: &["policy", "policies", "government", "congress", "senate", "executive", "order"] },
    LabelCues { label: "breakthroughs", cues: &["breakthrough", "researchers", "discovery", "quantum", "first", "record"] },
    LabelCues { label: "market trends", cues: &["market", "markets", "shares", "stock", "stocks", "sales", "demand", "growth"] },
    LabelCues { label: "microsoft news", cues: &["microsoft", "windows", "azure", "copilot", "xbox", "nadella"] },
    LabelCues { label: "general tech updates", cues: &["update", "updates", "app", "apps", "device", "devices", "software"] },
    LabelCues { label: "google news", cues: &["google", "alphabet", "android", "pixel", "chrome", "pichai", "youtube"] },
];

#[derive(Debug, Clone, Default)]
pub struct KeywordZeroShot;

impl KeywordZeroShot {
    pub fn new() -> Self {
        Self
    }

    fn cues_for(label: &str) -> Vec<String> {
        let mut cues: Vec<String> = tokenize(label);
        if let Some(lc) = LABEL_CUES.iter().find(|l| l.label.eq_ignore_ascii_case(label)) {
            cues.extend(lc.cues.iter().map(|c| c.to_string()));
        }
        cues.sort();
        cues.dedup();
        cues
    }

    /// Raw hit counts per candidate, in candidate order.
    pub fn hits(text: &str, candidate_labels: &[&str]) -> Vec<usize> {
        let tokens = tokenize(text);
        candidate_labels
            .iter()
            .map(|label| {
                let cues = Self::cues_for(label);
                tokens.iter().filter(|t| cues.contains(t)).count()
            })
            .collect()
    }
}

#[async_trait]
impl ZeroShotClassifier for KeywordZeroShot {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<ZeroShotOutput> {
        let hits = Self::hits(text, candidate_labels);
        let exps: Vec<f32> = hits.iter().map(|&h| (h as f32).exp()).collect();
        let total: f32 = exps.iter().sum();
        let pairs = candidate_labels
            .iter()
            .zip(exps)
            .map(|(l, e)| (l.to_string(), if total > 0.0 { e / total } else { 0.0 }))
            .collect();
        Ok(ZeroShotOutput::from_pairs(pairs))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

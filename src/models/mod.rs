// src/models/mod.rs
//! Model seams: text embeddings, sentiment and zero-shot classification.
//!
//! The models are opaque scoring functions. [`Models`] bundles one of each and is
//! built once at startup, then shared read-only (cloning only bumps `Arc`s).

pub mod hashing;
pub mod keyword;
pub mod lexicon;
pub mod remote;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::models::{Backend, ModelsConfig};
use crate::ingest::types::Labeled;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input text, same order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Top label with its raw (unrounded) score.
    async fn classify(&self, text: &str) -> Result<Labeled>;
    fn name(&self) -> &'static str;
}

/// Candidate labels ranked by score, highest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroShotOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ZeroShotOutput {
    pub fn top(&self) -> Option<Labeled> {
        let label = self.labels.first()?;
        let score = *self.scores.first()?;
        Some(Labeled {
            label: label.clone(),
            score,
        })
    }

    /// Build from unordered (label, score) pairs; ties keep input order.
    pub fn from_pairs(mut pairs: Vec<(String, f32)>) -> Self {
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        let (labels, scores) = pairs.into_iter().unzip();
        Self { labels, scores }
    }
}

#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<ZeroShotOutput>;
    fn name(&self) -> &'static str;
}

/// Process-wide model bundle.
#[derive(Clone)]
pub struct Models {
    pub embedder: Arc<dyn Embedder>,
    pub sentiment: Arc<dyn SentimentClassifier>,
    pub zero_shot: Arc<dyn ZeroShotClassifier>,
}

impl Models {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        sentiment: Arc<dyn SentimentClassifier>,
        zero_shot: Arc<dyn ZeroShotClassifier>,
    ) -> Self {
        Self {
            embedder,
            sentiment,
            zero_shot,
        }
    }

    /// Offline models: hashed embeddings, lexicon sentiment, keyword zero-shot.
    pub fn local() -> Self {
        Self::new(
            Arc::new(hashing::HashingEmbedder::default()),
            Arc::new(lexicon::LexiconSentiment::new()),
            Arc::new(keyword::KeywordZeroShot::new()),
        )
    }

    pub fn from_config(cfg: &ModelsConfig) -> Result<Self> {
        let models = match cfg.backend {
            Backend::Local => Self::local(),
            Backend::Remote => {
                let client = Arc::new(remote::HfInferenceClient::from_config(cfg)?);
                Self::new(client.clone(), client.clone(), client)
            }
        };
        tracing::info!(
            target: "models",
            backend = ?cfg.backend,
            embedder = models.embedder.name(),
            sentiment = models.sentiment.name(),
            zero_shot = models.zero_shot.name(),
            "models ready"
        );
        Ok(models)
    }
}

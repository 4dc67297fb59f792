// src/models/remote.rs
//! Hugging Face Inference API compatible client.
//!
//! `POST {endpoint}/{model}` with `{"inputs": ...}`. Response shapes differ between
//! hosted and self-hosted servers, so each task accepts the known variants.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::config::models::ModelsConfig;
use crate::ingest::types::Labeled;
use crate::models::{Embedder, SentimentClassifier, ZeroShotClassifier, ZeroShotOutput};

/// Maximum number of texts per embedding call.
const EMBED_BATCH: usize = 32;

pub struct HfInferenceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    embedding_model: String,
    sentiment_model: String,
    zero_shot_model: String,
}

#[derive(Serialize)]
struct Options {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct InputsRequest<'a, T: Serialize + ?Sized> {
    inputs: &'a T,
    options: Options,
}

#[derive(Serialize)]
struct ZeroShotParams<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParams<'a>,
    options: Options,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelsScores {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Object(LabelsScores),
    Batch(Vec<LabelsScores>),
    Pairs(Vec<LabelScore>),
}

impl HfInferenceClient {
    pub fn from_config(cfg: &ModelsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("news-radar/0.1 (+inference client)")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building inference http client")?;
        Ok(Self {
            http,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            embedding_model: cfg.embedding_model.clone(),
            sentiment_model: cfg.sentiment_model.clone(),
            zero_shot_model: cfg.zero_shot_model.clone(),
        })
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!("{}/{}", self.endpoint, model);
        let mut req = self.http.post(&url).json(body);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("inference request to {model}"))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "inference {model} returned {status}: {}",
                text.chars().take(200).collect::<String>()
            ));
        }
        resp.json::<R>()
            .await
            .with_context(|| format!("decoding {model} response"))
    }
}

#[async_trait]
impl Embedder for HfInferenceClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut all = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(EMBED_BATCH) {
            let body = InputsRequest {
                inputs: chunk,
                options: Options {
                    wait_for_model: true,
                },
            };
            let vectors: Vec<Vec<f32>> = self.post(&self.embedding_model, &body).await?;
            if vectors.len() != chunk.len() {
                return Err(anyhow!(
                    "embedding model returned {} vectors for {} inputs",
                    vectors.len(),
                    chunk.len()
                ));
            }
            all.extend(vectors);
        }
        Ok(all)
    }

    fn name(&self) -> &'static str {
        "hf-inference"
    }
}

#[async_trait]
impl SentimentClassifier for HfInferenceClient {
    async fn classify(&self, text: &str) -> Result<Labeled> {
        let body = InputsRequest {
            inputs: text,
            options: Options {
                wait_for_model: true,
            },
        };
        let resp: SentimentResponse = self.post(&self.sentiment_model, &body).await?;
        let candidates = match resp {
            SentimentResponse::Nested(mut v) => {
                if v.is_empty() {
                    Vec::new()
                } else {
                    v.swap_remove(0)
                }
            }
            SentimentResponse::Flat(v) => v,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|ls| Labeled {
                label: ls.label,
                score: ls.score,
            })
            .ok_or_else(|| anyhow!("sentiment model returned no labels"))
    }

    fn name(&self) -> &'static str {
        "hf-inference"
    }
}

#[async_trait]
impl ZeroShotClassifier for HfInferenceClient {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<ZeroShotOutput> {
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParams { candidate_labels },
            options: Options {
                wait_for_model: true,
            },
        };
        let resp: ZeroShotResponse = self.post(&self.zero_shot_model, &body).await?;
        let pairs: Vec<(String, f32)> = match resp {
            ZeroShotResponse::Object(ls) => ls.labels.into_iter().zip(ls.scores).collect(),
            ZeroShotResponse::Batch(mut v) => {
                let ls = v
                    .drain(..)
                    .next()
                    .ok_or_else(|| anyhow!("zero-shot model returned an empty batch"))?;
                ls.labels.into_iter().zip(ls.scores).collect()
            }
            ZeroShotResponse::Pairs(v) => v.into_iter().map(|ls| (ls.label, ls.score)).collect(),
        };
        if pairs.is_empty() {
            return Err(anyhow!("zero-shot model returned no labels"));
        }
        Ok(ZeroShotOutput::from_pairs(pairs))
    }

    fn name(&self) -> &'static str {
        "hf-inference"
    }
}

// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_MODELS_CONFIG_PATH: &str = "config/models.json";
pub const ENV_MODELS_CONFIG_PATH: &str = "NEWS_MODELS_CONFIG_PATH";
/// `NEWS_MODELS_MODE=local` forces the offline backend regardless of config.
pub const ENV_MODELS_MODE: &str = "NEWS_MODELS_MODE";

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}
fn default_embedding_model() -> String {
    "sentence-transformers/all-mpnet-base-v2".to_string()
}
fn default_sentiment_model() -> String {
    "cardiffnlp/twitter-roberta-base-sentiment".to_string()
}
fn default_zero_shot_model() -> String {
    "facebook/bart-large-mnli".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Offline: lexicon sentiment, hashed embeddings, keyword zero-shot.
    #[default]
    Local,
    /// Hugging Face Inference API compatible HTTP endpoint.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// "ENV" means: read from HF_API_TOKEN.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_sentiment_model")]
    pub sentiment_model: String,
    #[serde(default = "default_zero_shot_model")]
    pub zero_shot_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            endpoint: default_endpoint(),
            api_key: String::new(),
            embedding_model: default_embedding_model(),
            sentiment_model: default_sentiment_model(),
            zero_shot_model: default_zero_shot_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelsConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: ModelsConfig = serde_json::from_str(&data)?;

        // Resolve api key if "ENV"
        // Only the remote backend needs the token to be present.
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = match env::var("HF_API_TOKEN") {
                Ok(v) => v,
                Err(_) if cfg.backend == Backend::Local => String::new(),
                Err(_) => anyhow::bail!("Missing HF_API_TOKEN env var"),
            };
        }

        cfg.endpoint = cfg.endpoint.trim_end_matches('/').to_string();
        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = default_timeout_secs();
        }
        Ok(cfg)
    }

    /// `$NEWS_MODELS_CONFIG_PATH`, else `config/models.json`, else defaults (local backend).
    /// `NEWS_MODELS_MODE=local` wins over whatever the file says.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = env::var(ENV_MODELS_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_MODELS_CONFIG_PATH.to_string());
        let mut cfg = if Path::new(&path).exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        if env::var(ENV_MODELS_MODE).is_ok_and(|v| v.eq_ignore_ascii_case("local")) {
            cfg.backend = Backend::Local;
        }
        Ok(cfg)
    }
}

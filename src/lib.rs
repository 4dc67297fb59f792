// src/lib.rs
// Public library surface for the service binary, the CLI and integration tests.

pub mod api;
pub mod config;
pub mod enrich;
pub mod export;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod relevance;
pub mod search;
pub mod similarity;
pub mod summarize;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::ingest::types::{FeedProvider, NewsItem};
pub use crate::models::Models;

/// Build the full application router from on-disk/env configuration.
///
/// Loads feed and model config, builds providers and the model bundle.
/// `/metrics` is not included; the caller owns the global recorder.
pub fn app() -> anyhow::Result<axum::Router> {
    let feeds = config::load_feeds_default()?;
    let models_cfg = config::ModelsConfig::load_default()?;
    let models = Models::from_config(&models_cfg)?;
    let providers = ingest::build_providers(&feeds);

    tracing::info!(
        feeds = feeds.feeds.len(),
        per_feed_limit = feeds.per_feed_limit,
        "configuration loaded"
    );

    Ok(create_router(AppState::new(
        models,
        providers,
        feeds.per_feed_limit,
    )))
}

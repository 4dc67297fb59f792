//! News Radar — Binary Entrypoint
//! Boots the Axum HTTP server: feed config, model bundle, metrics and routes.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;

use news_radar::{config, metrics::Metrics, telemetry};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let feeds = config::load_feeds_default().context("loading feed config")?;
    let metrics = Metrics::init(feeds.feeds.len()).context("installing metrics recorder")?;

    let router = news_radar::app()
        .context("building application")?
        .merge(metrics.router());

    Ok(router.into())
}

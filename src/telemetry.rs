// src/telemetry.rs
//! Tracing subscriber setup and anonymized query ids for logs.

use sha2::{Digest, Sha256};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_JSON: &str = "NEWS_LOG_JSON";
const DEFAULT_FILTER: &str = "news_radar=info,warn";

/// Install the global subscriber. `RUST_LOG` overrides the default filter and
/// `NEWS_LOG_JSON=1` switches to JSON lines. A subscriber that is already
/// installed (e.g. by the hosting runtime) is left in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_JSON).is_ok_and(|v| v == "1");

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Short stable id for a query so logs never carry raw user text.
pub fn anon_id(query: &str) -> String {
    let digest = Sha256::digest(query.trim().to_lowercase().as_bytes());
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

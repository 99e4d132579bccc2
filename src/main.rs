//! Word Sentiment Service — Binary Entrypoint
//! Loads configuration and the lexicon, then serves the analyzer over HTTP.
//!
//! A missing or malformed lexicon is fatal: the process exits before binding.

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use word_sentiment::config::{ServiceConfig, DEFAULT_LOG_FILTER};
use word_sentiment::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ServiceConfig::load().inspect_err(|e| error!(error = %e, "invalid configuration"))?;

    let mut router = word_sentiment::app(&cfg)
        .inspect_err(|e| error!(error = ?e, "lexicon unavailable; refusing to start"))?;

    if cfg.metrics_enabled {
        match Metrics::init() {
            Ok(m) => router = router.merge(m.router()),
            Err(e) => warn!(error = %e, "metrics disabled"),
        }
    }

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, "word-sentiment listening");
    axum::serve(listener, router).await?;
    Ok(())
}

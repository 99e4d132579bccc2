use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder. Call at most once.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

        describe_counter!("sentiment_requests_total", "Analysis requests served.");
        describe_counter!(
            "sentiment_rejected_total",
            "Requests rejected at validation (bad threshold, oversized text)."
        );
        describe_counter!("sentiment_tokens_total", "Tokens scored across all requests.");
        describe_counter!("sentiment_words_total", "Scored words by dominant label.");
        describe_histogram!("sentiment_request_tokens", "Tokens per analysis request.");

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

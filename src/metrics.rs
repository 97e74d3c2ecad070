use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::sentiment::Sentiment;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process and return its handle.
    /// If another recorder is already global, `/metrics` renders what this one saw.
    pub fn init() -> Self {
        let handle = HANDLE
            .get_or_init(|| {
                let recorder = PrometheusBuilder::new().build_recorder();
                let handle = recorder.handle();
                if let Err(e) = metrics::set_global_recorder(recorder) {
                    warn!(error = %e, "prometheus: global recorder already set");
                }
                handle
            })
            .clone();
        Self { handle }
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

pub fn record_analysis(sentiment: Sentiment, elapsed_ms: f64) {
    counter!("sentiment_analyses_total", "sentiment" => sentiment.as_str()).increment(1);
    histogram!("sentiment_analyze_duration_ms").record(elapsed_ms);
}

pub fn record_batch_items(n: usize) {
    counter!("sentiment_batch_items_total").increment(n as u64);
}

pub fn record_validation_reject() {
    counter!("sentiment_validation_rejects_total").increment(1);
}

pub fn set_history_size(n: usize) {
    gauge!("sentiment_history_size").set(n as f64);
}

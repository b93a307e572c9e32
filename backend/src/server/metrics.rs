//! Prometheus request metrics, compiled in with the `metrics` feature.

use std::io;

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{IntCounter, Registry};

const NAMESPACE: &str = "orchard";
const ENDPOINT: &str = "/metrics";

/// Request metrics plus a counter of how often the starter catalogue was loaded.
#[derive(Clone)]
pub(crate) struct Metrics {
    pub(crate) http: PrometheusMetrics,
    pub(crate) seed_runs: IntCounter,
}

impl Metrics {
    /// Register the middleware and counters on a fresh registry.
    ///
    /// Health endpoints are excluded so orchestrator polling does not drown
    /// the request histograms.
    pub(crate) fn new() -> io::Result<Self> {
        let registry = Registry::new();
        let seed_runs = IntCounter::new(
            format!("{NAMESPACE}_seed_runs_total"),
            "Times the starter fruits replaced the catalogue",
        )
        .map_err(io::Error::other)?;
        registry
            .register(Box::new(seed_runs.clone()))
            .map_err(io::Error::other)?;

        let http = PrometheusMetricsBuilder::new(NAMESPACE)
            .registry(registry)
            .endpoint(ENDPOINT)
            .exclude("/health/ready")
            .exclude("/health/live")
            .build()
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(Self { http, seed_runs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_seed_counter() {
        let metrics = Metrics::new().expect("metrics build");
        metrics.seed_runs.inc();

        assert_eq!(metrics.seed_runs.get(), 1);
        assert!(!metrics.http.registry.gather().is_empty());
    }
}

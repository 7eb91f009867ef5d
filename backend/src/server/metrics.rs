//! Prometheus request metrics and dispatch counters.

use std::sync::Arc;

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use safety_backend::domain::ports::DispatchMetrics;
use safety_backend::outbound::metrics::PrometheusDispatchMetrics;

/// Build the request middleware serving `/metrics`.
///
/// # Errors
///
/// Returns an error when the default collectors cannot be registered.
pub(crate) fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("safety")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Register the dispatch counters on the middleware's registry.
pub(crate) fn dispatch_metrics(
    prometheus: &PrometheusMetrics,
) -> std::io::Result<Arc<dyn DispatchMetrics>> {
    let metrics = PrometheusDispatchMetrics::new(&prometheus.registry).map_err(|err| {
        std::io::Error::other(format!("dispatch metrics registration failed: {err}"))
    })?;
    Ok(Arc::new(metrics))
}

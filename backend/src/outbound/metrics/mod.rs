//! Prometheus-backed metrics adapters, compiled with the `metrics` feature.

mod prometheus_dispatch;

pub use prometheus_dispatch::PrometheusDispatchMetrics;

//! Prometheus adapter for SOS dispatch counters.
//!
//! `sos_dispatches_total{outcome}` counts dispatch invocations by terminal
//! outcome; `sos_sms_deliveries_total{outcome}` counts individual messages as
//! `delivered` or `failed`.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{DispatchMetricOutcome, DispatchMetrics, DispatchMetricsError};

const DELIVERED_LABEL: &str = "delivered";
const FAILED_LABEL: &str = "failed";

/// Prometheus-backed recorder for dispatch outcomes.
pub struct PrometheusDispatchMetrics {
    dispatches_total: IntCounterVec,
    deliveries_total: IntCounterVec,
}

impl PrometheusDispatchMetrics {
    /// Create and register counters with the provided registry.
    ///
    /// # Errors
    ///
    /// Returns an error when Prometheus rejects metric registration.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let dispatches_total = IntCounterVec::new(
            Opts::new("sos_dispatches_total", "SOS dispatches by outcome"),
            &["outcome"],
        )?;
        let deliveries_total = IntCounterVec::new(
            Opts::new("sos_sms_deliveries_total", "SOS SMS deliveries by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(dispatches_total.clone()))?;
        registry.register(Box::new(deliveries_total.clone()))?;
        Ok(Self {
            dispatches_total,
            deliveries_total,
        })
    }
}

#[async_trait]
impl DispatchMetrics for PrometheusDispatchMetrics {
    async fn record_dispatch(
        &self,
        outcome: DispatchMetricOutcome,
    ) -> Result<(), DispatchMetricsError> {
        self.dispatches_total
            .get_metric_with_label_values(&[outcome.as_label()])
            .map_err(|err| DispatchMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }

    async fn record_deliveries(
        &self,
        delivered: u64,
        failed: u64,
    ) -> Result<(), DispatchMetricsError> {
        for (label, count) in [(DELIVERED_LABEL, delivered), (FAILED_LABEL, failed)] {
            self.deliveries_total
                .get_metric_with_label_values(&[label])
                .map_err(|err| DispatchMetricsError::export(err.to_string()))?
                .inc_by(count);
        }
        Ok(())
    }
}

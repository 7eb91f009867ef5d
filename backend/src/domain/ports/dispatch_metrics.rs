//! Domain port surface for recording SOS dispatch metrics.
//!
//! Implementations may export to Prometheus or discard metrics when the
//! feature is disabled.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording dispatch metrics.
    pub enum DispatchMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "dispatch metrics exporter failed: {message}",
    }
}

/// Terminal outcome of one dispatch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMetricOutcome {
    Completed,
    Misconfigured,
    ProfileNotFound,
    NoContacts,
    StoreUnavailable,
}

impl DispatchMetricOutcome {
    /// Label value written to the metrics backend.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Misconfigured => "misconfigured",
            Self::ProfileNotFound => "profile_not_found",
            Self::NoContacts => "no_contacts",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

/// Metrics recording port for the notification dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchMetrics: Send + Sync {
    /// Record the outcome of one dispatch.
    async fn record_dispatch(&self, outcome: DispatchMetricOutcome)
    -> Result<(), DispatchMetricsError>;

    /// Record per-message results of one fan-out.
    async fn record_deliveries(
        &self,
        delivered: u64,
        failed: u64,
    ) -> Result<(), DispatchMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDispatchMetrics;

#[async_trait]
impl DispatchMetrics for NoOpDispatchMetrics {
    async fn record_dispatch(
        &self,
        _outcome: DispatchMetricOutcome,
    ) -> Result<(), DispatchMetricsError> {
        Ok(())
    }

    async fn record_deliveries(
        &self,
        _delivered: u64,
        _failed: u64,
    ) -> Result<(), DispatchMetricsError> {
        Ok(())
    }
}

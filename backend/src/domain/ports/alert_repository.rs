//! Port for the append-only alert log.

use async_trait::async_trait;

use crate::domain::{AlertRecord, NewAlert, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by alert repository adapters.
    pub enum AlertRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "alert repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "alert repository query failed: {message}",
    }
}

/// Port for appending and reading alert records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Append one record and return it as stored.
    async fn append(&self, alert: &NewAlert) -> Result<AlertRecord, AlertRepositoryError>;

    /// Newest records for `user_id`, newest first, at most `limit`.
    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AlertRecord>, AlertRepositoryError>;
}

/// Fixture implementation that echoes appends and lists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertRepository;

#[async_trait]
impl AlertRepository for FixtureAlertRepository {
    async fn append(&self, alert: &NewAlert) -> Result<AlertRecord, AlertRepositoryError> {
        Ok(AlertRecord {
            id: uuid::Uuid::new_v4(),
            user_id: alert.user_id.clone(),
            message: alert.message.clone(),
            alert_time: alert.alert_time,
            status: alert.status,
        })
    }

    async fn list_recent(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<AlertRecord>, AlertRepositoryError> {
        Ok(Vec::new())
    }
}

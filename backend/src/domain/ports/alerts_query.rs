//! Driving port for alert history reads.

use async_trait::async_trait;

use crate::domain::{AlertRecord, Error, UserId};

/// Domain use-case port for the recent alerts panel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertsQuery: Send + Sync {
    /// Most recent alerts for `user_id`, newest first.
    async fn recent(&self, user_id: &UserId) -> Result<Vec<AlertRecord>, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertsQuery;

#[async_trait]
impl AlertsQuery for FixtureAlertsQuery {
    async fn recent(&self, _user_id: &UserId) -> Result<Vec<AlertRecord>, Error> {
        Ok(Vec::new())
    }
}

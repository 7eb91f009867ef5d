//! Alert history query service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AlertRepository, AlertRepositoryError, AlertsQuery};
use crate::domain::{AlertRecord, Error, RECENT_ALERTS_LIMIT, UserId};

fn map_repository_error(error: AlertRepositoryError) -> Error {
    match error {
        AlertRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("alert repository unavailable: {message}"))
        }
        AlertRepositoryError::Query { message } => {
            Error::internal(format!("alert repository error: {message}"))
        }
    }
}

/// Alerts service implementing [`AlertsQuery`].
#[derive(Clone)]
pub struct AlertsQueryService<R> {
    alert_repo: Arc<R>,
}

impl<R> AlertsQueryService<R> {
    pub fn new(alert_repo: Arc<R>) -> Self {
        Self { alert_repo }
    }
}

#[async_trait]
impl<R> AlertsQuery for AlertsQueryService<R>
where
    R: AlertRepository,
{
    async fn recent(&self, user_id: &UserId) -> Result<Vec<AlertRecord>, Error> {
        self.alert_repo
            .list_recent(user_id, RECENT_ALERTS_LIMIT)
            .await
            .map_err(map_repository_error)
    }
}

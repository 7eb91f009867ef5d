//! PostgreSQL-backed `AlertRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AlertRepository, AlertRepositoryError};
use crate::domain::{AlertRecord, AlertStatus, NewAlert, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AlertRow, NewAlertRow};
use super::pool::{DbPool, PoolError};
use super::schema::alerts;

/// Diesel-backed append-only alert log.
#[derive(Clone)]
pub struct DieselAlertRepository {
    pool: DbPool,
}

impl DieselAlertRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AlertRepositoryError {
    map_basic_pool_error(error, AlertRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AlertRepositoryError {
    map_basic_diesel_error(
        error,
        AlertRepositoryError::query,
        AlertRepositoryError::connection,
    )
}

fn row_to_record(row: AlertRow) -> Result<AlertRecord, AlertRepositoryError> {
    let status: AlertStatus = row
        .status
        .parse()
        .map_err(|err| AlertRepositoryError::query(format!("stored alert {}: {err}", row.id)))?;
    Ok(AlertRecord {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        message: row.alert_message,
        alert_time: row.alert_time,
        status,
    })
}

fn limit_as_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl AlertRepository for DieselAlertRepository {
    async fn append(&self, alert: &NewAlert) -> Result<AlertRecord, AlertRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAlertRow {
            id: Uuid::new_v4(),
            user_id: *alert.user_id.as_uuid(),
            alert_message: alert.message.as_str(),
            alert_time: alert.alert_time,
            status: alert.status.as_str(),
        };

        let stored: AlertRow = diesel::insert_into(alerts::table)
            .values(&row)
            .returning(AlertRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(stored)
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AlertRecord>, AlertRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AlertRow> = alerts::table
            .filter(alerts::user_id.eq(user_id.as_uuid()))
            .order((alerts::alert_time.desc(), alerts::id.desc()))
            .limit(limit_as_i64(limit))
            .select(AlertRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}

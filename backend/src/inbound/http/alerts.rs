//! Alert history handler.
//!
//! ```text
//! GET /api/v1/alerts
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::AlertRecord;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One logged SOS dispatch.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub id: String,
    pub alert_message: String,
    #[schema(example = "2026-01-12T09:00:00Z")]
    pub alert_time: String,
    #[schema(example = "sent")]
    pub status: String,
}

impl From<AlertRecord> for AlertResponse {
    fn from(value: AlertRecord) -> Self {
        Self {
            id: value.id.to_string(),
            alert_message: value.message,
            alert_time: value.alert_time.to_rfc3339(),
            status: value.status.to_string(),
        }
    }
}

/// Five most recent alerts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    responses(
        (status = 200, description = "Recent alerts", body = [AlertResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["alerts"],
    operation_id = "listAlerts"
)]
#[get("/alerts")]
pub async fn list_alerts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AlertResponse>>> {
    let user_id = session.require_user_id()?;
    let alerts = state.alerts.recent(&user_id).await?;
    Ok(web::Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

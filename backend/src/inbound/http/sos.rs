//! SOS trigger handler.
//!
//! ```text
//! POST /api/v1/sos
//! ```
//!
//! Partial delivery is still a success: the body reports how many contacts
//! were reached and lists the ones that were not.

use actix_web::{post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ContactDelivery, DeliveryOutcome, DispatchResult};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Contact the alert did not reach.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedContactResponse {
    pub contact_id: String,
    #[schema(example = "Dad")]
    pub contact_name: String,
    #[schema(example = "gateway rejected message: invalid 'To' number")]
    pub reason: String,
}

/// Dispatch summary.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SosResponse {
    pub success: bool,
    #[schema(example = 1)]
    pub contacts_notified: usize,
    #[schema(example = 2)]
    pub total_contacts: usize,
    pub failed_contacts: Vec<FailedContactResponse>,
    /// Absent when the alert log write failed after sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<String>,
}

fn failed_contact(delivery: &ContactDelivery) -> Option<FailedContactResponse> {
    match &delivery.outcome {
        DeliveryOutcome::Failed { reason } => Some(FailedContactResponse {
            contact_id: delivery.contact_id.to_string(),
            contact_name: delivery.contact_name.to_string(),
            reason: reason.clone(),
        }),
        DeliveryOutcome::Delivered { .. } => None,
    }
}

impl From<DispatchResult> for SosResponse {
    fn from(value: DispatchResult) -> Self {
        Self {
            success: true,
            contacts_notified: value.contacts_notified,
            total_contacts: value.total_contacts,
            failed_contacts: value.deliveries.iter().filter_map(failed_contact).collect(),
            alert_id: value.alert_id.map(|id| id.to_string()),
        }
    }
}

/// Send the emergency SMS to every contact of the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/sos",
    responses(
        (status = 200, description = "Dispatch attempted", body = SosResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema),
        (status = 422, description = "No emergency contacts", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "SMS gateway not configured", body = ErrorSchema)
    ),
    tags = ["sos"],
    operation_id = "triggerSos"
)]
#[post("/sos")]
pub async fn trigger_sos(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SosResponse>> {
    let user_id = session.require_user_id()?;
    let result = state.sos.dispatch(&user_id).await?;
    Ok(web::Json(SosResponse::from(result)))
}

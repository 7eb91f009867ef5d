//! Emergency alert fan-out and delivery accounting.
//!
//! One dispatch resolves the caller's profile and contacts, composes a single
//! alert message, sends it to every contact concurrently, and folds the
//! per-contact results into a [`DispatchResult`]. Individual send failures
//! never abort the fan-out; only configuration and store problems are hard
//! errors.
//!
//! Sends are joined on the calling task rather than spawned, so the request
//! trace id stays in scope for every log line.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use mockable::{Clock, DefaultClock};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    AlertRepository, ContactRepository, ContactRepositoryError, DispatchMetricOutcome,
    DispatchMetrics, NoOpDispatchMetrics, SmsGateway, SmsMessage, SosDispatch,
    UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{AlertStatus, Contact, ContactName, Error, NewAlert, UserId, UserProfile};

/// Product name appended to every alert message unless configured otherwise.
pub const DEFAULT_SENDER_LABEL: &str = "Mangai Safety App";

/// Result of sending the alert to one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Gateway accepted the message.
    Delivered { message_sid: Option<String> },
    /// Gateway refused the message or could not be reached.
    Failed { reason: String },
}

/// Per-contact delivery record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDelivery {
    pub contact_id: Uuid,
    pub contact_name: ContactName,
    pub outcome: DeliveryOutcome,
}

impl ContactDelivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered { .. })
    }
}

/// Aggregate outcome of one dispatch.
///
/// ## Invariants
/// - `total_contacts == deliveries.len()` and is at least one.
/// - `contacts_notified` counts the delivered entries.
/// - `deliveries` follows the contact store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub contacts_notified: usize,
    pub total_contacts: usize,
    pub deliveries: Vec<ContactDelivery>,
    /// Identifier of the alert log entry; `None` when the log write failed
    /// after messages had already gone out.
    pub alert_id: Option<Uuid>,
}

impl DispatchResult {
    fn from_deliveries(deliveries: Vec<ContactDelivery>, alert_id: Option<Uuid>) -> Self {
        let contacts_notified = deliveries.iter().filter(|d| d.is_delivered()).count();
        Self {
            contacts_notified,
            total_contacts: deliveries.len(),
            deliveries,
            alert_id,
        }
    }

    /// Deliveries that did not reach their contact.
    pub fn failed(&self) -> impl Iterator<Item = &ContactDelivery> {
        self.deliveries.iter().filter(|d| !d.is_delivered())
    }
}

/// Hard failures of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("SMS gateway is not configured: {0}")]
    GatewayMisconfigured(String),
    #[error("User profile not found")]
    ProfileNotFound,
    #[error("No emergency contacts found. Please add emergency contacts first.")]
    NoContacts,
    #[error(transparent)]
    ProfileStore(#[from] UserProfileRepositoryError),
    #[error(transparent)]
    ContactStore(#[from] ContactRepositoryError),
}

impl DispatchError {
    fn metric_outcome(&self) -> DispatchMetricOutcome {
        match self {
            Self::GatewayMisconfigured(_) => DispatchMetricOutcome::Misconfigured,
            Self::ProfileNotFound => DispatchMetricOutcome::ProfileNotFound,
            Self::NoContacts => DispatchMetricOutcome::NoContacts,
            Self::ProfileStore(_) | Self::ContactStore(_) => {
                DispatchMetricOutcome::StoreUnavailable
            }
        }
    }
}

impl From<DispatchError> for Error {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::GatewayMisconfigured(_) => {
                Error::internal("SMS gateway credentials not configured")
            }
            DispatchError::ProfileNotFound => {
                Error::not_found(DispatchError::ProfileNotFound.to_string())
            }
            DispatchError::NoContacts => {
                Error::unprocessable(DispatchError::NoContacts.to_string())
                    .with_details(serde_json::json!({ "code": "no_contacts" }))
            }
            DispatchError::ProfileStore(UserProfileRepositoryError::Connection { message })
            | DispatchError::ContactStore(ContactRepositoryError::Connection { message }) => {
                Error::service_unavailable(format!("store unavailable: {message}"))
            }
            DispatchError::ProfileStore(err) => Error::internal(err.to_string()),
            DispatchError::ContactStore(err) => Error::internal(err.to_string()),
        }
    }
}

/// Compose the alert text sent to every contact.
///
/// # Examples
/// ```
/// use safety_backend::domain::{
///     DisplayName, PhoneNumber, UserId, UserProfile, compose_alert_message,
/// };
///
/// let profile = UserProfile::new(
///     UserId::random(),
///     DisplayName::new("Priya").expect("name"),
///     PhoneNumber::new("+919876543210").expect("phone"),
/// );
/// let text = compose_alert_message(&profile, "Safety App");
/// assert!(text.starts_with("🚨 EMERGENCY ALERT from Priya!"));
/// assert!(text.contains("Contact: +919876543210"));
/// ```
pub fn compose_alert_message(profile: &UserProfile, sender_label: &str) -> String {
    let name = profile.name();
    format!(
        "🚨 EMERGENCY ALERT from {name}!\n\n\
         This is an SOS alert. {name} may need immediate assistance. \
         Please check on them right away!\n\n\
         Contact: {phone}\n\n\
         This message was sent via {sender_label}.",
        phone = profile.phone(),
    )
}

/// Notification dispatcher implementing [`SosDispatch`].
#[derive(Clone)]
pub struct SosDispatchService<P, C, A> {
    profiles: Arc<P>,
    contacts: Arc<C>,
    alerts: Arc<A>,
    gateway: Arc<dyn SmsGateway>,
    metrics: Arc<dyn DispatchMetrics>,
    clock: Arc<dyn Clock>,
    sender_label: String,
}

impl<P, C, A> SosDispatchService<P, C, A> {
    /// Create a dispatcher with no-op metrics and the system clock.
    pub fn new(
        profiles: Arc<P>,
        contacts: Arc<C>,
        alerts: Arc<A>,
        gateway: Arc<dyn SmsGateway>,
    ) -> Self {
        Self {
            profiles,
            contacts,
            alerts,
            gateway,
            metrics: Arc::new(NoOpDispatchMetrics),
            clock: Arc::new(DefaultClock),
            sender_label: DEFAULT_SENDER_LABEL.to_owned(),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn DispatchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sender_label(mut self, sender_label: impl Into<String>) -> Self {
        self.sender_label = sender_label.into();
        self
    }
}

impl<P, C, A> SosDispatchService<P, C, A>
where
    P: UserProfileRepository,
    C: ContactRepository,
    A: AlertRepository,
{
    /// Run one dispatch for `user_id`.
    pub async fn run(&self, user_id: &UserId) -> Result<DispatchResult, DispatchError> {
        self.gateway
            .ensure_configured()
            .map_err(|err| DispatchError::GatewayMisconfigured(err.to_string()))?;

        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or(DispatchError::ProfileNotFound)?;

        let contacts = self.contacts.list_for_user(user_id).await?;
        if contacts.is_empty() {
            return Err(DispatchError::NoContacts);
        }

        let body = compose_alert_message(&profile, &self.sender_label);
        info!(
            user_id = %user_id,
            total_contacts = contacts.len(),
            "dispatching SOS alert"
        );

        let deliveries = join_all(contacts.iter().map(|contact| self.deliver(contact, &body))).await;

        let alert_id = self.log_alert(user_id, body).await;
        let result = DispatchResult::from_deliveries(deliveries, alert_id);
        self.record_metrics(&result).await;

        info!(
            user_id = %user_id,
            contacts_notified = result.contacts_notified,
            total_contacts = result.total_contacts,
            "SOS alert dispatched"
        );
        Ok(result)
    }

    async fn deliver(&self, contact: &Contact, body: &str) -> ContactDelivery {
        let message = SmsMessage {
            to: contact.number.clone(),
            body: body.to_owned(),
        };
        let outcome = match self.gateway.send(&message).await {
            Ok(receipt) => DeliveryOutcome::Delivered {
                message_sid: receipt.message_sid,
            },
            Err(err) => {
                warn!(
                    contact_id = %contact.id,
                    error = %err,
                    "SOS delivery to contact failed"
                );
                DeliveryOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        ContactDelivery {
            contact_id: contact.id,
            contact_name: contact.name.clone(),
            outcome,
        }
    }

    async fn log_alert(&self, user_id: &UserId, message: String) -> Option<Uuid> {
        let alert = NewAlert {
            user_id: user_id.clone(),
            message,
            alert_time: self.clock.utc(),
            status: AlertStatus::Sent,
        };
        match self.alerts.append(&alert).await {
            Ok(record) => Some(record.id),
            Err(err) => {
                // Messages already left the gateway; report them regardless.
                error!(user_id = %user_id, error = %err, "failed to record SOS alert");
                None
            }
        }
    }

    async fn record_metrics(&self, result: &DispatchResult) {
        let delivered = u64::try_from(result.contacts_notified).unwrap_or(u64::MAX);
        let failed =
            u64::try_from(result.total_contacts - result.contacts_notified).unwrap_or(u64::MAX);
        if let Err(err) = self.metrics.record_deliveries(delivered, failed).await {
            warn!(error = %err, "failed to record SOS delivery metrics");
        }
        self.record_outcome(DispatchMetricOutcome::Completed).await;
    }

    async fn record_outcome(&self, outcome: DispatchMetricOutcome) {
        if let Err(err) = self.metrics.record_dispatch(outcome).await {
            warn!(error = %err, "failed to record SOS dispatch metric");
        }
    }
}

#[async_trait]
impl<P, C, A> SosDispatch for SosDispatchService<P, C, A>
where
    P: UserProfileRepository,
    C: ContactRepository,
    A: AlertRepository,
{
    async fn dispatch(&self, user_id: &UserId) -> Result<DispatchResult, Error> {
        match self.run(user_id).await {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "SOS dispatch failed");
                self.record_outcome(err.metric_outcome()).await;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "sos_tests.rs"]
mod tests;

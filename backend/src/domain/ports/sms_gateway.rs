//! Driven port for sending SMS through an external gateway.
//!
//! The domain owns the message and receipt shapes so the dispatcher stays
//! independent of the gateway vendor.

use async_trait::async_trait;

use crate::domain::PhoneNumber;

use super::define_port_error;

/// One outbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub to: PhoneNumber,
    pub body: String,
}

/// Gateway acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReceipt {
    /// Gateway-assigned message identifier, when the body carried one.
    pub message_sid: Option<String>,
    /// Gateway-reported status, for example `queued`.
    pub status: String,
}

define_port_error! {
    /// Errors surfaced while sending SMS.
    pub enum SmsGatewayError {
        /// Credentials or sender number are absent from configuration.
        Misconfigured { message: String } =>
            "sms gateway misconfigured: {message}",
        /// Gateway refused the credentials.
        Unauthorized { message: String } =>
            "sms gateway rejected credentials: {message}",
        /// Gateway rejected the message, e.g. an invalid destination.
        Rejected { status: u16, message: String } =>
            "sms gateway rejected message ({status}): {message}",
        /// Gateway rate-limited the request.
        RateLimited { message: String } =>
            "sms gateway rate limited request: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "sms gateway transport failed: {message}",
        /// Send exceeded the client timeout.
        Timeout { message: String } =>
            "sms gateway timeout: {message}",
    }
}

/// Port for SMS delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Report whether the gateway can send at all.
    ///
    /// Called once per dispatch before any store lookup.
    fn ensure_configured(&self) -> Result<(), SmsGatewayError>;

    /// Send one message. Each call is independent of every other call.
    async fn send(&self, message: &SmsMessage) -> Result<SmsReceipt, SmsGatewayError>;
}

/// Gateway used when credentials are missing at startup.
///
/// Keeps the service bootable while every dispatch fails fast.
#[derive(Debug, Clone)]
pub struct UnconfiguredSmsGateway {
    missing: String,
}

impl UnconfiguredSmsGateway {
    /// `missing` names the absent settings, e.g. `TWILIO_AUTH_TOKEN`.
    pub fn new(missing: impl Into<String>) -> Self {
        Self {
            missing: missing.into(),
        }
    }

    fn error(&self) -> SmsGatewayError {
        SmsGatewayError::misconfigured(format!("missing {}", self.missing))
    }
}

#[async_trait]
impl SmsGateway for UnconfiguredSmsGateway {
    fn ensure_configured(&self) -> Result<(), SmsGatewayError> {
        Err(self.error())
    }

    async fn send(&self, _message: &SmsMessage) -> Result<SmsReceipt, SmsGatewayError> {
        Err(self.error())
    }
}

/// Fixture gateway accepting every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSmsGateway;

#[async_trait]
impl SmsGateway for FixtureSmsGateway {
    fn ensure_configured(&self) -> Result<(), SmsGatewayError> {
        Ok(())
    }

    async fn send(&self, _message: &SmsMessage) -> Result<SmsReceipt, SmsGatewayError> {
        Ok(SmsReceipt {
            message_sid: Some("SM00000000000000000000000000000000".to_owned()),
            status: "queued".to_owned(),
        })
    }
}

//! Reqwest-backed Twilio-style SMS gateway.
//!
//! This adapter owns transport details only: form encoding, basic auth,
//! timeout and HTTP error mapping, and JSON decoding into receipts. Any 2xx
//! counts as delivered; an unreadable body only costs the receipt its sid.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::warn;
use zeroize::Zeroizing;

use super::dto::{ErrorBodyDto, MessageResourceDto};
use crate::domain::ports::{SmsGateway, SmsGatewayError, SmsMessage, SmsReceipt};
use crate::outbound::http_support::{body_preview, status_message};

/// Public API root used when no override is configured.
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// Account credentials and sender number.
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: Zeroizing<String>,
    /// Sender number in E.164 form.
    pub from_number: String,
}

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum TwilioSmsGatewayBuildError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid messages endpoint: {0}")]
    Endpoint(String),
}

/// SMS gateway adapter posting to `Accounts/{sid}/Messages.json`.
pub struct TwilioSmsGateway {
    client: Client,
    messages_url: Url,
    account_sid: String,
    auth_token: Zeroizing<String>,
    from_number: String,
}

impl TwilioSmsGateway {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. A timed-out send surfaces as [`SmsGatewayError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or the base URL and
    /// account sid do not form a valid endpoint.
    pub fn new(
        base_url: &Url,
        credentials: TwilioCredentials,
        timeout: Duration,
    ) -> Result<Self, TwilioSmsGatewayBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        let messages_url = messages_url(base_url, &credentials.account_sid)?;
        Ok(Self {
            client,
            messages_url,
            account_sid: credentials.account_sid,
            auth_token: credentials.auth_token,
            from_number: credentials.from_number,
        })
    }
}

fn messages_url(base_url: &Url, account_sid: &str) -> Result<Url, TwilioSmsGatewayBuildError> {
    let raw = format!(
        "{}/2010-04-01/Accounts/{account_sid}/Messages.json",
        base_url.as_str().trim_end_matches('/'),
    );
    Url::parse(&raw).map_err(|err| TwilioSmsGatewayBuildError::Endpoint(err.to_string()))
}

#[async_trait]
impl SmsGateway for TwilioSmsGateway {
    fn ensure_configured(&self) -> Result<(), SmsGatewayError> {
        Ok(())
    }

    async fn send(&self, message: &SmsMessage) -> Result<SmsReceipt, SmsGatewayError> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(self.auth_token.as_str()))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("To", message.to.as_ref()),
                ("From", self.from_number.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        Ok(receipt_from_body(status, body.as_ref()))
    }
}

fn receipt_from_body(status: StatusCode, body: &[u8]) -> SmsReceipt {
    let decoded = serde_json::from_slice::<MessageResourceDto>(body).unwrap_or_else(|error| {
        warn!(
            status = status.as_u16(),
            %error,
            body = %body_preview(body),
            "accepted SMS response is not a message resource"
        );
        MessageResourceDto::default()
    });
    let receipt = decoded.into_receipt();
    if receipt.message_sid.is_none() {
        warn!(status = status.as_u16(), "accepted SMS response carried no message sid");
    }
    receipt
}

fn map_transport_error(error: reqwest::Error) -> SmsGatewayError {
    if error.is_timeout() {
        SmsGatewayError::timeout(error.to_string())
    } else {
        SmsGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SmsGatewayError {
    let detail = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.summary())
        .unwrap_or_else(|| body_preview(body));
    let message = status_message(status, &detail);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SmsGatewayError::unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => SmsGatewayError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SmsGatewayError::timeout(message)
        }
        _ if status.is_client_error() => SmsGatewayError::rejected(status.as_u16(), detail),
        _ => SmsGatewayError::transport(message),
    }
}

//! Reqwest-backed identity provider for a Supabase-style auth API.
//!
//! Uses `POST /auth/v1/signup` and `POST /auth/v1/token?grant_type=password`
//! with the service key sent as `apikey`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{
    AuthErrorDto, AuthResponseDto, PasswordGrantDto, SignupMetadataDto, SignupRequestDto,
};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{LoginCredentials, SignupDetails, UserId};
use crate::outbound::http_support::{body_preview, status_message};

/// Identity provider adapter.
pub struct SupabaseIdentityProvider {
    client: Client,
    signup_url: Url,
    token_url: Url,
    api_key: Zeroizing<String>,
}

impl SupabaseIdentityProvider {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// project URL cannot be extended with the auth paths.
    pub fn new(
        project_url: &Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        let root = project_url.as_str().trim_end_matches('/');
        let signup_url = parse_endpoint(&format!("{root}/auth/v1/signup"))?;
        let token_url = parse_endpoint(&format!("{root}/auth/v1/token?grant_type=password"))?;
        Ok(Self {
            client,
            signup_url,
            token_url,
            api_key,
        })
    }

    async fn post_json<T: serde::Serialize + Sync>(
        &self,
        url: &Url,
        payload: &T,
    ) -> Result<(StatusCode, Vec<u8>), IdentityProviderError> {
        let response = self
            .client
            .post(url.clone())
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, IdentityProviderError> {
    Url::parse(raw)
        .map_err(|err| IdentityProviderError::transport(format!("invalid auth URL: {err}")))
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(&self, details: &SignupDetails) -> Result<UserId, IdentityProviderError> {
        let payload = SignupRequestDto {
            email: details.email(),
            password: details.password(),
            data: SignupMetadataDto {
                name: details.name().as_ref(),
                phone: details.phone().as_ref(),
            },
        };
        let (status, body) = self.post_json(&self.signup_url, &payload).await?;
        if !status.is_success() {
            return Err(map_signup_status(status, &body));
        }
        parse_user_id(&body)
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        let payload = PasswordGrantDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        let (status, body) = self.post_json(&self.token_url, &payload).await?;
        if !status.is_success() {
            return Err(map_sign_in_status(status, &body));
        }
        parse_user_id(&body)
    }
}

fn parse_user_id(body: &[u8]) -> Result<UserId, IdentityProviderError> {
    let decoded: AuthResponseDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid auth payload: {error}"))
    })?;
    let raw = decoded
        .into_user_id()
        .ok_or_else(|| IdentityProviderError::decode("auth payload has no user id"))?;
    UserId::new(&raw).map_err(|err| IdentityProviderError::decode(format!("{err}: {raw}")))
}

fn error_detail(body: &[u8]) -> String {
    serde_json::from_slice::<AuthErrorDto>(body)
        .ok()
        .and_then(AuthErrorDto::into_message)
        .unwrap_or_else(|| body_preview(body))
}

fn map_common_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let message = status_message(status, &error_detail(body));
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(message)
        }
        _ => IdentityProviderError::transport(message),
    }
}

fn map_signup_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT {
        let detail = error_detail(body);
        return IdentityProviderError::rejected(if detail.is_empty() {
            status_message(status, "")
        } else {
            detail
        });
    }
    map_common_status(status, body)
}

fn map_sign_in_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityProviderError::InvalidCredentials
        }
        _ if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT => {
            IdentityProviderError::rejected(error_detail(body))
        }
        _ => map_common_status(status, body),
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

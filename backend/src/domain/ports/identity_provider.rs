//! Driven port for the external identity provider.
//!
//! Registration and password verification are delegated; the domain only
//! learns the resulting user id.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, SignupDetails, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by identity provider adapters.
    pub enum IdentityProviderError {
        /// Email/password pair was refused.
        InvalidCredentials =>
            "invalid credentials",
        /// Provider refused the registration, e.g. the email is taken.
        Rejected { message: String } =>
            "identity provider rejected request: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "identity provider transport failed: {message}",
        /// Request exceeded the client timeout.
        Timeout { message: String } =>
            "identity provider timeout: {message}",
        /// Response body could not be decoded.
        Decode { message: String } =>
            "identity provider response decode failed: {message}",
    }
}

/// Port for registering and authenticating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account, passing name and phone as user metadata.
    async fn sign_up(&self, details: &SignupDetails) -> Result<UserId, IdentityProviderError>;

    /// Verify an email/password pair.
    async fn sign_in(&self, credentials: &LoginCredentials)
    -> Result<UserId, IdentityProviderError>;
}

const FIXTURE_EMAIL: &str = "admin@example.com";
const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Development provider accepting one fixed account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    fn fixture_user() -> Result<UserId, IdentityProviderError> {
        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| IdentityProviderError::decode(format!("invalid fixture user id: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_up(&self, _details: &SignupDetails) -> Result<UserId, IdentityProviderError> {
        Self::fixture_user()
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        if credentials.email() == FIXTURE_EMAIL && credentials.password() == FIXTURE_PASSWORD {
            Self::fixture_user()
        } else {
            Err(IdentityProviderError::InvalidCredentials)
        }
    }
}

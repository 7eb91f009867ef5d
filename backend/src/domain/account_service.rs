//! Account domain services: sign-up, login and profile reads.
//!
//! Credentials never touch the store; the identity provider owns them and
//! returns the user id that keys the profile row.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, IdentityProvider, IdentityProviderError, UserProfileQuery,
    UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{Error, LoginCredentials, SignupDetails, UserId, UserProfile};

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("Invalid email or password")
        }
        IdentityProviderError::Rejected { message } => Error::invalid_request(message),
        IdentityProviderError::Transport { message } | IdentityProviderError::Timeout { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityProviderError::Decode { message } => {
            Error::internal(format!("identity provider response invalid: {message}"))
        }
    }
}

fn map_repository_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

/// Account service implementing [`AccountCommand`] and [`UserProfileQuery`].
#[derive(Clone)]
pub struct AccountService<P, I: ?Sized> {
    profile_repo: Arc<P>,
    identity: Arc<I>,
}

impl<P, I: ?Sized> AccountService<P, I> {
    pub fn new(profile_repo: Arc<P>, identity: Arc<I>) -> Self {
        Self {
            profile_repo,
            identity,
        }
    }
}

#[async_trait]
impl<P, I> AccountCommand for AccountService<P, I>
where
    P: UserProfileRepository,
    I: IdentityProvider + ?Sized,
{
    async fn sign_up(&self, details: &SignupDetails) -> Result<UserId, Error> {
        let user_id = self
            .identity
            .sign_up(details)
            .await
            .map_err(map_identity_error)?;

        let profile = UserProfile::new(
            user_id.clone(),
            details.name().clone(),
            details.phone().clone(),
        );
        self.profile_repo
            .upsert(&profile)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user_id, "account created");
        Ok(user_id)
    }

    async fn log_in(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.identity
            .sign_in(credentials)
            .await
            .map_err(map_identity_error)
    }
}

#[async_trait]
impl<P, I> UserProfileQuery for AccountService<P, I>
where
    P: UserProfileRepository,
    I: IdentityProvider + ?Sized,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.profile_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("User profile not found"))
    }
}

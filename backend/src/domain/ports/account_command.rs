//! Driving port for sign-up and login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! register or authenticate without knowing (or importing) the identity
//! provider or the profile store.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupDetails, UserId};

/// Domain use-case port for account access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account and store its profile.
    async fn sign_up(&self, details: &SignupDetails) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user id.
    async fn log_in(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Fixture accepting `admin@example.com` / `password` and every sign-up.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountCommand;

fn fixture_user_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USER_ID).map_err(|err| Error::internal(format!("fixture user id: {err}")))
}

#[async_trait]
impl AccountCommand for FixtureAccountCommand {
    async fn sign_up(&self, _details: &SignupDetails) -> Result<UserId, Error> {
        fixture_user_id()
    }

    async fn log_in(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email() == "admin@example.com" && credentials.password() == "password" {
            fixture_user_id()
        } else {
            Err(Error::unauthorized("Invalid email or password"))
        }
    }
}

//! Driving port for the SOS trigger.
//!
//! Inbound adapters call this port to fan an alert out to the caller's
//! contacts without knowing which gateway or store backs it.

use async_trait::async_trait;

use crate::domain::{DispatchResult, Error, UserId};

/// Domain use-case port for emergency alert dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SosDispatch: Send + Sync {
    /// Notify every contact of `user_id` and summarise the deliveries.
    async fn dispatch(&self, user_id: &UserId) -> Result<DispatchResult, Error>;
}

/// Fixture dispatcher used when no store is wired.
///
/// Mirrors the behaviour of an account with no saved contacts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSosDispatch;

#[async_trait]
impl SosDispatch for FixtureSosDispatch {
    async fn dispatch(&self, _user_id: &UserId) -> Result<DispatchResult, Error> {
        Err(crate::domain::DispatchError::NoContacts.into())
    }
}

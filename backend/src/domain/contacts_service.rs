//! Emergency contact domain services.
//!
//! These services implement the contacts driving ports. The per-user cap is
//! checked here before the store is touched, and the store re-checks it
//! atomically so racing inserts cannot exceed it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery,
};
use crate::domain::{Contact, Error, MAX_CONTACTS_PER_USER, NewContact, UserId};

fn limit_error(limit: usize) -> Error {
    Error::conflict(format!(
        "You can only add up to {limit} emergency contacts"
    ))
    .with_details(serde_json::json!({ "code": "contact_limit", "limit": limit }))
}

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
        ContactRepositoryError::LimitReached { limit } => limit_error(limit),
    }
}

/// Contacts service implementing both contacts driving ports.
#[derive(Clone)]
pub struct ContactsService<R> {
    contact_repo: Arc<R>,
}

impl<R> ContactsService<R> {
    pub fn new(contact_repo: Arc<R>) -> Self {
        Self { contact_repo }
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactsService<R>
where
    R: ContactRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Contact>, Error> {
        self.contact_repo
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactsService<R>
where
    R: ContactRepository,
{
    async fn add(&self, user_id: &UserId, contact: NewContact) -> Result<Contact, Error> {
        let existing = self
            .contact_repo
            .count_for_user(user_id)
            .await
            .map_err(map_repository_error)?;
        if existing >= MAX_CONTACTS_PER_USER {
            return Err(limit_error(MAX_CONTACTS_PER_USER));
        }

        let stored = self
            .contact_repo
            .insert(user_id, &contact, MAX_CONTACTS_PER_USER)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user_id, contact_id = %stored.id, "emergency contact added");
        Ok(stored)
    }

    async fn remove(&self, user_id: &UserId, contact_id: Uuid) -> Result<(), Error> {
        let deleted = self
            .contact_repo
            .delete(user_id, &contact_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("contact {contact_id} not found")));
        }
        info!(user_id = %user_id, contact_id = %contact_id, "emergency contact removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "contacts_service_tests.rs"]
mod tests;

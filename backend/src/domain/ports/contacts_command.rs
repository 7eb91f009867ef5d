//! Driving port for contact mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contact, Error, NewContact, UserId};

/// Domain use-case port for adding and removing emergency contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Add a contact, enforcing the per-user cap.
    async fn add(&self, user_id: &UserId, contact: NewContact) -> Result<Contact, Error>;

    /// Remove a contact owned by `user_id`.
    async fn remove(&self, user_id: &UserId, contact_id: Uuid) -> Result<(), Error>;
}

/// Fixture command that accepts adds and reports removals as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactsCommand;

#[async_trait]
impl ContactsCommand for FixtureContactsCommand {
    async fn add(&self, user_id: &UserId, contact: NewContact) -> Result<Contact, Error> {
        Ok(Contact {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            name: contact.name,
            number: contact.number,
            created_at: chrono::Utc::now(),
        })
    }

    async fn remove(&self, _user_id: &UserId, _contact_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found("contact not found"))
    }
}

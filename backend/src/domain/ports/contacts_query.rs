//! Driving port for contact reads.

use async_trait::async_trait;

use crate::domain::{Contact, Error, UserId};

/// Domain use-case port for listing emergency contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Contacts owned by `user_id`, oldest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Contact>, Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactsQuery;

#[async_trait]
impl ContactsQuery for FixtureContactsQuery {
    async fn list(&self, _user_id: &UserId) -> Result<Vec<Contact>, Error> {
        Ok(Vec::new())
    }
}

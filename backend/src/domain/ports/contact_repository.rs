//! Port for emergency contact persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contact, NewContact, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// The owner already holds the maximum number of contacts.
        LimitReached { limit: usize } =>
            "Maximum of {limit} emergency contacts allowed",
    }
}

/// Port for the contact store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts owned by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Number of live contacts owned by `user_id`.
    async fn count_for_user(&self, user_id: &UserId) -> Result<usize, ContactRepositoryError>;

    /// Store a new contact.
    ///
    /// Adapters must reject the insert with
    /// [`ContactRepositoryError::LimitReached`] when the owner already holds
    /// `limit` contacts, atomically with respect to concurrent inserts.
    async fn insert(
        &self,
        user_id: &UserId,
        contact: &NewContact,
        limit: usize,
    ) -> Result<Contact, ContactRepositoryError>;

    /// Delete a contact owned by `user_id`. Returns `false` when no such row
    /// exists.
    async fn delete(&self, user_id: &UserId, contact_id: &Uuid)
    -> Result<bool, ContactRepositoryError>;
}

/// Fixture implementation with an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactRepository;

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_for_user(&self, _user_id: &UserId) -> Result<usize, ContactRepositoryError> {
        Ok(0)
    }

    async fn insert(
        &self,
        user_id: &UserId,
        contact: &NewContact,
        _limit: usize,
    ) -> Result<Contact, ContactRepositoryError> {
        Ok(Contact {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            name: contact.name.clone(),
            number: contact.number.clone(),
            created_at: chrono::Utc::now(),
        })
    }

    async fn delete(
        &self,
        _user_id: &UserId,
        _contact_id: &Uuid,
    ) -> Result<bool, ContactRepositoryError> {
        Ok(false)
    }
}

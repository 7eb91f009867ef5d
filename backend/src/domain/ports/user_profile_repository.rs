//! Port for reading and writing user profiles.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user profile repository query failed: {message}",
    }
}

/// Port for profile persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Insert the profile or replace the stored name and phone.
    async fn upsert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Find a profile by owning user id.
    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileRepository;

#[async_trait]
impl UserProfileRepository for FixtureUserProfileRepository {
    async fn upsert(&self, _profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(None)
    }
}

//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load a user's profile without importing
//! persistence details.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, PhoneNumber, UserId, UserProfile};

/// Domain use-case port for reading the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile for the authenticated user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}

/// Fixture profile query used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        let name = DisplayName::new("Ada Lovelace")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        let phone = PhoneNumber::new("+15551234567")
            .map_err(|err| Error::internal(format!("invalid fixture phone: {err}")))?;
        Ok(UserProfile::new(user_id.clone(), name, phone))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_query_returns_requested_user() {
        let query = FixtureUserProfileQuery;
        let user_id = UserId::new("11111111-1111-1111-1111-111111111111").expect("user id");

        let profile = query
            .fetch_profile(&user_id)
            .await
            .expect("profile response");
        assert_eq!(profile.id(), &user_id);
        assert_eq!(profile.name().as_ref(), "Ada Lovelace");
    }
}

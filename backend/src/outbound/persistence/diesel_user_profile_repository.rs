//! PostgreSQL-backed `UserProfileRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{DisplayName, PhoneNumber, UserId, UserProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed profile store keyed by the identity-provider user id.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_basic_pool_error(error, UserProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_basic_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<UserProfile, UserProfileRepositoryError> {
    let name = DisplayName::new(&row.name).map_err(|err| {
        UserProfileRepositoryError::query(format!("stored profile {}: {err}", row.id))
    })?;
    let phone = PhoneNumber::from_stored(&row.phone).map_err(|err| {
        UserProfileRepositoryError::query(format!("stored profile {}: {err}", row.id))
    })?;
    Ok(UserProfile::new(UserId::from_uuid(row.id), name, phone))
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn upsert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProfileRow {
            id: *profile.id().as_uuid(),
            name: profile.name().as_ref(),
            phone: profile.phone().as_ref(),
        };

        diesel::insert_into(profiles::table)
            .values(&row)
            .on_conflict(profiles::id)
            .do_update()
            .set((
                profiles::name.eq(excluded(profiles::name)),
                profiles::phone.eq(excluded(profiles::phone)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(name: &str, phone: &str) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            phone: phone.to_owned(),
        }
    }

    #[rstest]
    fn stored_numbers_with_formatting_still_load() {
        let profile = row_to_profile(row("Priya", "+91 98765-43210")).expect("profile");
        assert_eq!(profile.phone().as_ref(), "+91 98765-43210");
    }

    #[rstest]
    #[case(row("", "+15550001"))]
    #[case(row("Priya", "call me"))]
    fn corrupt_rows_are_query_errors(#[case] stored: ProfileRow) {
        let err = row_to_profile(stored).expect_err("corrupt row");
        assert!(matches!(err, UserProfileRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, UserProfileRepositoryError::Connection { .. }));
    }
}

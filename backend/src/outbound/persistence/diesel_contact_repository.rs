//! PostgreSQL-backed `ContactRepository`.
//!
//! The cap is enforced twice: `insert` counts inside a transaction after
//! locking the owner's profile row, and the `contacts_limit` trigger rejects
//! any eleventh row that slips past a writer not using this adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactName, NewContact, PhoneNumber, UserId};

use super::diesel_basic_error_mapping::{
    is_contact_limit_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, profiles};

/// Diesel-backed contact store.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    map_basic_pool_error(error, ContactRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    map_basic_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        ContactRepositoryError::query(format!("stored contact {}: {err}", row.id))
    };
    let name = ContactName::new(&row.contact_name).map_err(corrupt)?;
    let number = PhoneNumber::from_stored(&row.contact_number).map_err(corrupt)?;
    Ok(Contact {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        name,
        number,
        created_at: row.created_at,
    })
}

/// Failure inside the insert transaction.
enum InsertFailure {
    LimitReached,
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for InsertFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

fn limit_as_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .order((contacts::created_at.asc(), contacts::id.asc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<usize, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = contacts::table
            .filter(contacts::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    async fn insert(
        &self,
        user_id: &UserId,
        contact: &NewContact,
        limit: usize,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = *user_id.as_uuid();
        let row = NewContactRow {
            id: Uuid::new_v4(),
            user_id: owner,
            contact_name: contact.name.as_ref(),
            contact_number: contact.number.as_ref(),
        };
        let max = limit_as_i64(limit);

        let result = conn
            .transaction::<ContactRow, InsertFailure, _>(|conn| {
                async move {
                    // Serialise concurrent inserts for the same owner.
                    profiles::table
                        .filter(profiles::id.eq(owner))
                        .select(profiles::id)
                        .for_update()
                        .first::<Uuid>(conn)
                        .await
                        .optional()?;

                    let existing: i64 = contacts::table
                        .filter(contacts::user_id.eq(owner))
                        .count()
                        .get_result(conn)
                        .await?;
                    if existing >= max {
                        return Err(InsertFailure::LimitReached);
                    }

                    let stored = diesel::insert_into(contacts::table)
                        .values(&row)
                        .returning(ContactRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(stored)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(stored) => row_to_contact(stored),
            Err(InsertFailure::LimitReached) => Err(ContactRepositoryError::limit_reached(limit)),
            Err(InsertFailure::Database(error)) if is_contact_limit_violation(&error) => {
                Err(ContactRepositoryError::limit_reached(limit))
            }
            Err(InsertFailure::Database(error)) => Err(map_diesel_error(error)),
        }
    }

    async fn delete(
        &self,
        user_id: &UserId,
        contact_id: &Uuid,
    ) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            contacts::table
                .filter(contacts::id.eq(contact_id))
                .filter(contacts::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

//! Diesel error mapping shared by every repository.
//!
//! Each port error enum has `Connection` and `Query` variants; callers pass
//! the matching constructors so the classification lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Message raised by the contact cap trigger.
pub(crate) const CONTACT_LIMIT_TRIGGER_MESSAGE: &str = "Maximum of 10 emergency contacts allowed";

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// Row-decoding failures and constraint violations are query errors; only a
/// closed connection or an unreachable server counts as a connection error.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("stored row could not be decoded"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Whether a Diesel error is the contact cap trigger firing.
pub(crate) fn is_contact_limit_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(_, info) if info.message().contains(CONTACT_LIMIT_TRIGGER_MESSAGE)
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Connection(String),
        Query(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |msg| Mapped::Query(msg.to_owned()),
            |msg| Mapped::Connection(msg.to_owned()),
        )
    }

    struct TriggerInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for TriggerInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("contacts")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(TriggerInfo(message)))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::ClosedConnection, "gone")),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    fn not_found_is_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            Mapped::Query("record not found".to_owned())
        );
    }

    #[rstest]
    #[case(CONTACT_LIMIT_TRIGGER_MESSAGE, true)]
    #[case("duplicate key value violates unique constraint", false)]
    fn detects_contact_limit_trigger(#[case] message: &'static str, #[case] expected: bool) {
        let error = database_error(DatabaseErrorKind::Unknown, message);
        assert_eq!(is_contact_limit_violation(&error), expected);
    }
}

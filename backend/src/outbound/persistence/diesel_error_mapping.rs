//! Translation of Diesel and pool failures into [`UserPersistenceError`].
//!
//! Only unique violations keep structure (the constraint name); everything
//! else collapses to a connection or query failure with a short message.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Used when the driver reports a unique violation without naming the
/// constraint.
const UNKNOWN_CONSTRAINT: &str = "unknown";

/// Pool failures mean the database was never reached.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::unique_violation(
                info.constraint_name().unwrap_or(UNKNOWN_CONSTRAINT),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message()),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        other => UserPersistenceError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    /// Driver error details as PostgreSQL reports them for a constraint.
    struct ConstraintViolation {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ConstraintViolation {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintViolation {
                message: "duplicate key value violates unique constraint",
                constraint,
            }),
        )
    }

    #[rstest]
    #[case(Some("users_email_key"), "users_email_key")]
    #[case(None, UNKNOWN_CONSTRAINT)]
    fn unique_violation_keeps_constraint_name(
        #[case] constraint: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mapped = map_diesel_error(unique_violation(constraint));
        assert_eq!(mapped, UserPersistenceError::unique_violation(expected));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_database_errors_keep_driver_message() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::Unknown,
            Box::new("relation \"users\" does not exist".to_owned()),
        );
        assert_eq!(
            map_diesel_error(error),
            UserPersistenceError::query("relation \"users\" does not exist")
        );
    }

    #[rstest]
    fn non_database_errors_keep_their_rendering() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            UserPersistenceError::query(DieselError::NotFound.to_string())
        );
    }

    #[rstest]
    fn pool_checkout_failure_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("timed out waiting for connection"));
        assert_eq!(
            mapped,
            UserPersistenceError::connection("timed out waiting for connection")
        );
    }
}

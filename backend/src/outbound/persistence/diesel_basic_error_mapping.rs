//! Shared Diesel error mapping for the brokerage repositories.
//!
//! Each repository supplies its own `connection`/`query` constructors; the
//! classification of Diesel failures is common. Unique violations are
//! surfaced separately so callers can turn them into domain conflicts.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Whether the failure is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map common Diesel failures into query/connection constructors.
///
/// Detail stays in the debug log; the returned message is generic.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        _ => query("database error"),
    }
}

/// Map a stored row that fails domain conversion.
pub(crate) fn map_corrupt_row<E, Q>(message: String, query: Q) -> E
where
    Q: FnOnce(String) -> E,
{
    tracing::warn!(%message, "stored row failed domain conversion");
    query(message)
}

//! Shared Diesel error mapping for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;
use super::row_mapper::QueryError;

/// Pool failures always mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::connection(message)
}

/// Map Diesel errors onto connection or query failures.
///
/// Driver messages are logged at debug level and replaced with fixed text so
/// SQL fragments never reach a response body.
pub(crate) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::NotFound => PersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        _ => PersistenceError::query("database error"),
    }
}

pub(crate) fn map_query_error(error: QueryError) -> PersistenceError {
    match error {
        QueryError::Execution(diesel) => map_diesel_error(diesel),
    }
}

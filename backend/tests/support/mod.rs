//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module holds the embedded PostgreSQL bootstrap and schema helpers they
//! share.

pub mod pg_embed;

use postgres::{Client, NoTls};

/// Tables the service expects to exist. `events.message` is nullable here so
/// tests can store rows the service cannot decode.
pub const SCHEMA: &str = "
    CREATE TABLE users (
        id UUID PRIMARY KEY,
        name VARCHAR NOT NULL
    );
    CREATE TABLE events (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        message VARCHAR,
        time TIMESTAMPTZ NOT NULL
    );
";

/// Render a `postgres` error with the database message when there is one.
///
/// The `Display` implementation collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Open a blocking client. Must not be called from inside a Tokio runtime.
pub fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

/// Create the tables in [`SCHEMA`].
pub fn create_schema(url: &str) -> Result<(), String> {
    connect(url)?
        .batch_execute(SCHEMA)
        .map_err(|err| format_postgres_error(&err))
}

/// Whether the opt-in flag for embedded PostgreSQL suites is set.
pub fn pg_embedded_enabled() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}

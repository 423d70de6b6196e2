//! Generic query-to-records mapping.
//!
//! Every read in the persistence layer goes through [`fetch_all`]: run one
//! parameterised statement and decode each row positionally into `T`. A row
//! that fails to decode is logged and skipped; the remaining rows are still
//! returned. A statement that fails to execute yields no rows at all.
//!
//! Decoding is compile-time bound: callers pass a Diesel query whose select
//! clause comes from `T::as_select()`, so the column list and the field
//! order of the row struct cannot drift apart.

use std::pin::pin;

use diesel::result::Error as DieselError;
use diesel_async::methods::LoadQuery;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use futures_util::{Stream, StreamExt};
use tracing::warn;

type DecodeFailure = Box<dyn std::error::Error + Send + Sync>;

/// Failure to run a statement.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The statement was rejected or the connection failed mid-stream.
    #[error("query execution failed: {0}")]
    Execution(#[source] DieselError),
}

/// A single row that could not be decoded into its record type.
#[derive(Debug, thiserror::Error)]
#[error("row {row} could not be decoded: {source}")]
pub struct ScanError {
    /// Zero-based position of the row in the result set.
    pub row: usize,
    source: DecodeFailure,
}

/// Run `query` and decode every row into `T`.
///
/// Zero matching rows is an empty vector, not an error.
///
/// # Errors
///
/// Returns [`QueryError::Execution`] when the statement cannot be executed or
/// the result stream breaks. Undecodable rows are not errors.
///
/// # Examples
/// ```ignore
/// let rows: Vec<UserRow> =
///     fetch_all(&mut conn, users::table.select(UserRow::as_select())).await?;
/// ```
pub async fn fetch_all<'query, Q, T>(
    conn: &mut AsyncPgConnection,
    query: Q,
) -> Result<Vec<T>, QueryError>
where
    Q: LoadQuery<'query, AsyncPgConnection, T> + Send + 'query,
    T: Send + 'static,
{
    let rows = query
        .load_stream::<T>(conn)
        .await
        .map_err(QueryError::Execution)?;
    collect_rows(rows).await
}

/// Drain a stream of decoded rows, skipping the ones that failed to decode.
pub(crate) async fn collect_rows<S, T>(rows: S) -> Result<Vec<T>, QueryError>
where
    S: Stream<Item = Result<T, DieselError>>,
{
    let mut rows = pin!(rows);
    let mut records = Vec::new();
    let mut index = 0_usize;
    while let Some(row) = rows.next().await {
        match row {
            Ok(record) => records.push(record),
            Err(DieselError::DeserializationError(source)) => {
                let scan = ScanError { row: index, source };
                warn!(row = scan.row, error = %scan, "skipping undecodable row");
            }
            Err(other) => return Err(QueryError::Execution(other)),
        }
        index += 1;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use rstest::rstest;

    fn undecodable() -> Result<i32, DieselError> {
        Err(DieselError::DeserializationError(
            "unexpected null for non-null column".into(),
        ))
    }

    #[rstest]
    #[tokio::test]
    async fn undecodable_row_is_skipped() {
        let rows = stream::iter(vec![Ok(1), undecodable(), Ok(3)]);

        let records = collect_rows(rows).await.expect("rows collected");

        assert_eq!(records, vec![1, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_result_is_empty_vec() {
        let rows = stream::iter(Vec::<Result<i32, DieselError>>::new());

        let records = collect_rows(rows).await.expect("rows collected");

        assert!(records.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn broken_stream_discards_collected_rows() {
        let rows = stream::iter(vec![Ok(1), Err(DieselError::BrokenTransactionManager), Ok(3)]);

        let err = collect_rows(rows).await.expect_err("stream failure surfaces");

        assert!(matches!(
            err,
            QueryError::Execution(DieselError::BrokenTransactionManager)
        ));
    }

    #[rstest]
    fn scan_error_names_the_row() {
        let scan = ScanError {
            row: 7,
            source: "bad uuid".into(),
        };
        assert_eq!(scan.to_string(), "row 7 could not be decoded: bad uuid");
    }
}

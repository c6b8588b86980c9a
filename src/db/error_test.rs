//! Tests for database error types.

use std::time::Duration;

use crate::db::{DbError, DbResult};

#[test]
fn database_rejection_is_a_query_error() {
    let err = DbError::from_query(sqlx::Error::RowNotFound);
    assert!(matches!(err, DbError::Query { .. }));
    assert!(err.to_string().starts_with("Query failed: "));
}

#[test]
fn pool_failures_are_connection_errors() {
    assert!(matches!(
        DbError::from_query(sqlx::Error::PoolTimedOut),
        DbError::Connection { .. }
    ));
    assert!(matches!(
        DbError::from_query(sqlx::Error::PoolClosed),
        DbError::Connection { .. }
    ));
}

#[test]
fn type_mismatch_is_a_decode_error() {
    let err = DbError::from_query(sqlx::Error::ColumnNotFound("fav_numbers".to_string()));
    assert!(matches!(err, DbError::Decode { row: 0, .. }));
}

#[test]
fn decode_error_displays_row_index() {
    let err = DbError::Decode {
        row: 3,
        source: sqlx::Error::ColumnNotFound("email".to_string()),
    };
    assert!(err.to_string().starts_with("Failed to decode row 3: "));
}

#[test]
fn stream_error_displays_rows_read() {
    let err = DbError::Stream {
        rows_read: 2,
        source: sqlx::Error::Protocol("unexpected close".to_string()),
    };
    assert!(
        err.to_string()
            .starts_with("Result stream failed after 2 rows: ")
    );
}

#[test]
fn invalid_data_error_displays_correctly() {
    let err = DbError::InvalidData {
        message: "bad filter".to_string(),
        help: "Check the filter values".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid data: bad filter (hint: Check the filter values)"
    );
}

#[test]
fn cancellation_and_timeout_are_aborts() {
    assert!(DbError::Cancelled.is_aborted());
    assert!(
        DbError::Timeout {
            timeout: Duration::from_secs(1)
        }
        .is_aborted()
    );
    assert!(!DbError::from_query(sqlx::Error::RowNotFound).is_aborted());
}

#[test]
fn timeout_error_displays_duration() {
    let err = DbError::Timeout {
        timeout: Duration::from_millis(1500),
    };
    assert_eq!(err.to_string(), "Query timed out after 1.5s");
}

#[test]
fn db_result_err_returns_error() {
    let result: DbResult<i32> = Err(DbError::Cancelled);
    assert!(result.is_err());
}

//! Database error types.
//!
//! This module provides the error taxonomy for account queries.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//!
//! A lookup that matches no row is not an error: single-record lookups return
//! `Ok(None)` instead.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Connection error: {source}")]
    #[diagnostic(
        code(accounts::db::connection_error),
        help("Check that the database is reachable and the URL is correct.")
    )]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    #[error("Query failed: {source}")]
    #[diagnostic(code(accounts::db::query_error))]
    Query {
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to decode row {row}: {source}")]
    #[diagnostic(code(accounts::db::decode_error))]
    Decode {
        row: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("Result stream failed after {rows_read} rows: {source}")]
    #[diagnostic(code(accounts::db::stream_error))]
    Stream {
        rows_read: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid data: {message} (hint: {help})")]
    #[diagnostic(code(accounts::db::invalid_data))]
    InvalidData { message: String, help: String },

    #[error("Query was cancelled")]
    #[diagnostic(code(accounts::db::cancelled))]
    Cancelled,

    #[error("Query timed out after {timeout:?}")]
    #[diagnostic(
        code(accounts::db::timeout),
        help("Increase the timeout or narrow the query.")
    )]
    Timeout { timeout: Duration },
}

impl DbError {
    /// Classify an error raised while issuing a statement.
    ///
    /// Pool and transport failures become `Connection`, type mismatches
    /// become `Decode` at row 0, everything else is a `Query` failure.
    pub(crate) fn from_query(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connection { source },
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. } => DbError::Decode { row: 0, source },
            _ => DbError::Query { source },
        }
    }

    /// Whether the error was produced by the caller's context rather than the store.
    pub fn is_aborted(&self) -> bool {
        matches!(self, DbError::Cancelled | DbError::Timeout { .. })
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

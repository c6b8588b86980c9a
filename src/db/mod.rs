//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for reading accounts,
//! allowing different storage backends (SQLite, PostgreSQL) to be swapped
//! without changing callers.
//!
//! # Architecture
//!
//! - `error`: Error taxonomy for account queries
//! - `models`: Domain entities (Account, AccountFilter)
//! - `repository`: Trait definitions for data access
//! - `query`: Parameterized WHERE clause builder
//! - `codec`: Array column bridging, injected per backend
//! - `context`: Cancellation and deadlines for each call
//! - `sqlite`, `postgres`: Concrete backends

pub(crate) mod codec;
mod context;
mod error;
mod hook;
mod models;
mod postgres;
pub(crate) mod query;
mod repository;
mod rows;
pub(crate) mod sqlite;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod models_test;

pub use codec::NumberArrayCodec;
pub use context::QueryContext;
pub use error::{DbError, DbResult};
pub use hook::{QueryHook, TracingQueryHook};
pub use models::*;
pub use postgres::{NativeArrayCodec, PgAccountRepository, PgDatabase};
pub use query::{Dialect, FilterValue, WhereBuilder, WhereClause, build_account_where};
pub use repository::*;
pub use sqlite::{JsonArrayCodec, SqliteAccountRepository, SqliteDatabase};

//! SQLite connection pool management.

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::account::SqliteAccountRepository;
use super::codec::JsonArrayCodec;
use crate::db::{Database, DbError, DbResult, QueryHook};

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
    hook: Option<Arc<dyn QueryHook>>,
}

impl SqliteDatabase {
    /// Open a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|source| DbError::Connection { source })?;

        info!(path = %path.as_ref().display(), "Opened SQLite database");
        Ok(Self::from_pool(pool))
    }

    /// Connect using a `sqlite:` URL.
    pub async fn connect(url: &str, max_connections: u32) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|source| DbError::Connection { source })?;

        info!(url, "Connected to SQLite database");
        Ok(Self::from_pool(pool))
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Each SQLite in-memory connection is a separate database, so the pool is
    /// pinned to one connection that never expires.
    pub async fn in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|source| DbError::Connection { source })?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool, hook: None }
    }

    /// Install a hook on every repository handed out by this database.
    pub fn with_query_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Get the underlying connection pool.
    ///
    /// This is useful for testing and advanced operations that need
    /// direct database access.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Accounts<'a> = SqliteAccountRepository<'a>;

    fn accounts(&self) -> Self::Accounts<'_> {
        SqliteAccountRepository::new(&self.pool, JsonArrayCodec).with_optional_hook(self.hook.clone())
    }
}

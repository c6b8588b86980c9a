//! PostgreSQL connection pool management.

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use super::account::PgAccountRepository;
use super::codec::NativeArrayCodec;
use crate::db::{Database, DbError, DbResult, QueryHook};

/// PostgreSQL database implementation.
pub struct PgDatabase {
    pool: PgPool,
    hook: Option<Arc<dyn QueryHook>>,
}

impl PgDatabase {
    /// Connect using a `postgres://` URL.
    pub async fn connect(url: &str, max_connections: u32) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|source| DbError::Connection { source })?;

        info!(max_connections, "Connected to PostgreSQL database");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool, hook: None }
    }

    /// Install a hook on every repository handed out by this database.
    pub fn with_query_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Database for PgDatabase {
    type Accounts<'a> = PgAccountRepository<'a>;

    fn accounts(&self) -> Self::Accounts<'_> {
        PgAccountRepository::new(&self.pool, NativeArrayCodec).with_optional_hook(self.hook.clone())
    }
}

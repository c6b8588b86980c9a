//! SQLite AccountRepository implementation.

use std::sync::Arc;

use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::debug;

use super::codec::JsonArrayCodec;
use crate::db::codec::{NumberArrayCodec, column_decode_error};
use crate::db::query::{
    Dialect, WhereClause, build_account_where, build_id_where, select_account_sql,
    select_accounts_sql,
};
use crate::db::rows::collect_rows;
use crate::db::{
    Account, AccountFilter, AccountRepository, DbError, DbResult, FilterValue, QueryContext,
    QueryHook,
};

/// SQLx-backed account repository.
pub struct SqliteAccountRepository<'a, C = JsonArrayCodec> {
    pool: &'a SqlitePool,
    codec: C,
    hook: Option<Arc<dyn QueryHook>>,
}

impl<'a, C> SqliteAccountRepository<'a, C>
where
    C: NumberArrayCodec<SqliteRow>,
{
    pub fn new(pool: &'a SqlitePool, codec: C) -> Self {
        Self {
            pool,
            codec,
            hook: None,
        }
    }

    /// Report every generated statement to `hook` before it is issued.
    pub fn with_query_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub(crate) fn with_optional_hook(mut self, hook: Option<Arc<dyn QueryHook>>) -> Self {
        self.hook = hook;
        self
    }

    fn observe(&self, operation: &'static str, sql: &str, params: &[FilterValue]) {
        if let Some(hook) = &self.hook {
            hook.on_query(operation, sql, params);
        }
    }

    fn account_from_row(&self, row: &SqliteRow) -> Result<Account, sqlx::Error> {
        let id: i64 = row.try_get(0)?;
        let id = u64::try_from(id).map_err(|e| column_decode_error(0, e))?;

        let properties: Option<String> = row.try_get(6)?;
        let properties = match properties.as_deref() {
            None | Some("") => Value::Null,
            Some(text) => serde_json::from_str(text).map_err(|e| column_decode_error(6, e))?,
        };

        Ok(Account {
            id,
            name: row.try_get(1)?,
            email: row.try_get(2)?,
            active: row.try_get(3)?,
            fav_color: row.try_get(4)?,
            fav_numbers: self.codec.decode(row, 5)?,
            properties,
            created_at: row.try_get(7)?,
        })
    }

    async fn fetch_accounts(
        &self,
        ctx: &QueryContext,
        operation: &'static str,
        clause: &WhereClause,
    ) -> DbResult<Vec<Account>> {
        let sql = select_accounts_sql(clause);
        self.observe(operation, &sql, clause.params());

        let query = bind_params(sqlx::query(&sql), clause.params())?;
        let accounts = ctx
            .run(collect_rows(query.fetch(self.pool), |row| {
                self.account_from_row(row)
            }))
            .await?;

        debug!(operation, count = accounts.len(), "Fetched accounts");
        Ok(accounts)
    }
}

impl<'a, C> AccountRepository for SqliteAccountRepository<'a, C>
where
    C: NumberArrayCodec<SqliteRow>,
{
    async fn find_by_id(&self, ctx: &QueryContext, id: u64) -> DbResult<Option<Account>> {
        // SQLite keys are signed; anything larger cannot be stored
        let Ok(key) = i64::try_from(id) else {
            debug!(id, "Account id outside storable range");
            return Ok(None);
        };

        let clause = build_id_where(key, Dialect::Sqlite);
        let sql = select_account_sql(&clause);
        self.observe("find_by_id", &sql, clause.params());

        let query = bind_params(sqlx::query(&sql), clause.params())?;
        let row = ctx
            .run(async {
                query
                    .fetch_optional(self.pool)
                    .await
                    .map_err(DbError::from_query)
            })
            .await?;

        row.map(|row| {
            self.account_from_row(&row)
                .map_err(|source| DbError::Decode { row: 0, source })
        })
        .transpose()
    }

    async fn find_all(&self, ctx: &QueryContext) -> DbResult<Vec<Account>> {
        self.fetch_accounts(ctx, "find_all", &WhereClause::default())
            .await
    }

    async fn find_filtered(
        &self,
        ctx: &QueryContext,
        filter: &AccountFilter,
    ) -> DbResult<Vec<Account>> {
        let clause = build_account_where(filter, Dialect::Sqlite);
        self.fetch_accounts(ctx, "find_filtered", &clause).await
    }
}

/// Bind clause parameters in order. Sets travel as one JSON array each.
fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[FilterValue],
) -> DbResult<Query<'q, Sqlite, SqliteArguments<'q>>> {
    for param in params {
        query = match param {
            FilterValue::Int(value) => query.bind(*value),
            FilterValue::Bool(value) => query.bind(*value),
            FilterValue::TextSet(values) => {
                let json = serde_json::to_string(values).map_err(|e| DbError::InvalidData {
                    message: format!("Failed to encode filter set: {}", e),
                    help: "Filter values must be valid UTF-8 strings".to_string(),
                })?;
                query.bind(json)
            }
        };
    }
    Ok(query)
}

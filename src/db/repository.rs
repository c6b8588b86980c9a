//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use crate::db::{Account, AccountFilter, DbResult, QueryContext};

/// Read access to accounts.
pub trait AccountRepository {
    /// Get an account by ID. Returns `Ok(None)` when no row matches.
    async fn find_by_id(&self, ctx: &QueryContext, id: u64) -> DbResult<Option<Account>>;

    /// Get all accounts ordered by ID.
    async fn find_all(&self, ctx: &QueryContext) -> DbResult<Vec<Account>>;

    /// Get accounts matching every constraint present in `filter`, ordered by ID.
    async fn find_filtered(
        &self,
        ctx: &QueryContext,
        filter: &AccountFilter,
    ) -> DbResult<Vec<Account>>;
}

/// Combined database interface.
///
/// Hands out repositories that borrow the backend's connection pool.
pub trait Database: Send + Sync {
    type Accounts<'a>: AccountRepository
    where
        Self: 'a;

    /// Get the account repository.
    fn accounts(&self) -> Self::Accounts<'_>;
}

//! Optional observation of generated statements.

use tracing::debug;

use crate::db::FilterValue;

/// Receives every statement a repository is about to issue.
///
/// Hooks observe only; they cannot alter the statement or fail the call.
pub trait QueryHook: Send + Sync {
    fn on_query(&self, operation: &'static str, sql: &str, params: &[FilterValue]);
}

/// Logs statements and their parameters at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingQueryHook;

impl QueryHook for TracingQueryHook {
    fn on_query(&self, operation: &'static str, sql: &str, params: &[FilterValue]) {
        let params = serde_json::to_string(params).unwrap_or_else(|_| format!("{:?}", params));
        debug!(operation, sql, %params, "Issuing query");
    }
}

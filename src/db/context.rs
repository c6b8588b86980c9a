//! Per-request execution context.
//!
//! A `QueryContext` carries the caller's cancellation token and optional
//! deadline. Repositories pass every I/O future through [`QueryContext::run`],
//! so an aborted request never yields partial data.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::db::{DbError, DbResult};

/// Cancellation and deadline for a single repository call.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    cancel: CancellationToken,
    deadline: Option<(Instant, Duration)>,
}

impl QueryContext {
    /// A context that never times out and is only cancelled through its token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the request once `timeout` has elapsed from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some((Instant::now() + timeout, timeout));
        self
    }

    /// Tie this context to an externally owned token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels every call made with this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel all in-flight and future calls using this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the context is cancelled or expires first.
    ///
    /// The future is dropped on abort, which releases any connection or row
    /// stream it holds.
    pub async fn run<F, T>(&self, fut: F) -> DbResult<T>
    where
        F: Future<Output = DbResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(DbError::Cancelled);
        }
        if let Some((deadline, timeout)) = self.deadline {
            if deadline <= Instant::now() {
                return Err(DbError::Timeout { timeout });
            }
        }

        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(DbError::Cancelled),
                result = fut => result,
            }
        };

        match self.deadline {
            Some((deadline, timeout)) => tokio::time::timeout_at(deadline, guarded)
                .await
                .map_err(|_| DbError::Timeout { timeout })?,
            None => guarded.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_returns_inner_result() {
        let ctx = QueryContext::new();
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn run_propagates_inner_error() {
        let ctx = QueryContext::new();
        let result: DbResult<()> = ctx.run(async { Err(DbError::Cancelled) }).await;
        assert!(matches!(result, Err(DbError::Cancelled)));
    }

    #[tokio::test]
    async fn run_refuses_work_on_cancelled_context() {
        let ctx = QueryContext::new();
        ctx.cancel();

        let result = ctx.run(async { Ok(1) }).await;
        assert!(matches!(result, Err(DbError::Cancelled)));
    }

    #[tokio::test]
    async fn run_aborts_when_cancelled_mid_flight() {
        let token = CancellationToken::new();
        let ctx = QueryContext::new().with_cancellation(token.clone());

        let trigger = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result: DbResult<()> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        trigger.await.unwrap();
        assert!(matches!(result, Err(DbError::Cancelled)));
    }

    #[tokio::test]
    async fn run_times_out_after_deadline() {
        let ctx = QueryContext::new().with_timeout(Duration::from_millis(50));

        let result: DbResult<()> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        match result {
            Err(DbError::Timeout { timeout }) => assert_eq!(timeout, Duration::from_millis(50)),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_refuses_work_after_deadline_passed() {
        let ctx = QueryContext::new().with_timeout(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(10)).await;

        let result = ctx.run(async { Ok(5) }).await;
        assert!(matches!(result, Err(DbError::Timeout { .. })));
    }
}

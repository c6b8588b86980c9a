//! Fail-closed collection of result streams.

use futures_util::{Stream, TryStreamExt};

use crate::db::{DbError, DbResult};

/// Drain `rows`, decoding each one with `decode`.
///
/// The first failure aborts the whole collection and the rows decoded so far
/// are dropped. Stream errors before any row arrived are query failures;
/// errors after that are reported as `DbError::Stream`. The stream is dropped
/// on every exit path.
pub(crate) async fn collect_rows<S, R, T, F>(mut rows: S, mut decode: F) -> DbResult<Vec<T>>
where
    S: Stream<Item = Result<R, sqlx::Error>> + Unpin,
    F: FnMut(&R) -> Result<T, sqlx::Error>,
{
    let mut items = Vec::new();

    loop {
        let next = rows.try_next().await.map_err(|source| {
            if items.is_empty() {
                DbError::from_query(source)
            } else {
                DbError::Stream {
                    rows_read: items.len(),
                    source,
                }
            }
        })?;

        let Some(row) = next else {
            break;
        };

        let item = decode(&row).map_err(|source| DbError::Decode {
            row: items.len(),
            source,
        })?;
        items.push(item);
    }

    Ok(items)
}

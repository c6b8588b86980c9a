//! Bridging between stored integer arrays and `Vec<i64>`.
//!
//! Each backend represents `fav_numbers` differently: PostgreSQL has native
//! `BIGINT[]`, SQLite stores a JSON array in a TEXT column. Repositories take a
//! codec at construction instead of reaching for a process-wide type registry.

use sqlx::Row;

/// Encode and decode an ordered integer sequence for one backend.
///
/// Implementations must map NULL and empty arrays to an empty `Vec` and
/// preserve element order.
pub trait NumberArrayCodec<R: Row>: Send + Sync {
    /// Value bound as a parameter when writing the column.
    type Encoded;

    /// Decode the column at `index` of `row`.
    fn decode(&self, row: &R, index: usize) -> Result<Vec<i64>, sqlx::Error>;

    /// Encode `numbers` into the backend's parameter representation.
    fn encode(&self, numbers: &[i64]) -> Result<Self::Encoded, sqlx::Error>;
}

/// Wrap a codec-level failure as a column decode error.
pub(crate) fn column_decode_error<E>(index: usize, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(source),
    }
}

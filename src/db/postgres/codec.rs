//! Native array codec for PostgreSQL.

use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::db::codec::NumberArrayCodec;

/// Reads and writes `BIGINT[]` columns directly. NULL decodes as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeArrayCodec;

impl NumberArrayCodec<PgRow> for NativeArrayCodec {
    type Encoded = Vec<i64>;

    fn decode(&self, row: &PgRow, index: usize) -> Result<Vec<i64>, sqlx::Error> {
        let numbers: Option<Vec<i64>> = row.try_get(index)?;
        Ok(numbers.unwrap_or_default())
    }

    fn encode(&self, numbers: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
        Ok(numbers.to_vec())
    }
}

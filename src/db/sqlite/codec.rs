//! JSON-text array codec for SQLite.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::codec::{NumberArrayCodec, column_decode_error};

/// Stores integer arrays as JSON text (`[1,2,3]`).
///
/// NULL, an empty string and the JSON literal `null` all decode to an empty
/// array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayCodec;

impl NumberArrayCodec<SqliteRow> for JsonArrayCodec {
    type Encoded = String;

    fn decode(&self, row: &SqliteRow, index: usize) -> Result<Vec<i64>, sqlx::Error> {
        let raw: Option<String> = row.try_get(index)?;

        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(Vec::new()),
            Some(text) => serde_json::from_str::<Option<Vec<i64>>>(text)
                .map(Option::unwrap_or_default)
                .map_err(|e| column_decode_error(index, e)),
        }
    }

    fn encode(&self, numbers: &[i64]) -> Result<String, sqlx::Error> {
        serde_json::to_string(numbers).map_err(|e| sqlx::Error::Encode(Box::new(e)))
    }
}

//! PostgreSQL implementation of the database traits.
//!
//! Uses native `BIGINT[]`, `JSONB` and `TIMESTAMPTZ` columns.

mod account;
mod codec;
mod connection;


pub use account::PgAccountRepository;
pub use codec::NativeArrayCodec;
pub use connection::PgDatabase;

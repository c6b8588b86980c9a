//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod account;
mod codec;
mod connection;

#[cfg(test)]
pub(crate) mod testing;

pub use account::SqliteAccountRepository;
pub use codec::JsonArrayCodec;
pub use connection::SqliteDatabase;

//! Typed, parameterized read access to an `accounts` table.
//!
//! The [`db`] module holds the repository traits and their SQLite and
//! PostgreSQL implementations; [`cli`] is a small front-end over them.

pub mod cli;
pub mod config;
pub mod db;

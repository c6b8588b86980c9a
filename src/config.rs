//! Runtime configuration.
//!
//! Values come from CLI flags first, then environment variables.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::db::QueryContext;

/// Environment variable consulted when no `--database-url` is given.
pub const DATABASE_URL_ENV: &str = "ACCOUNTS_DATABASE_URL";
/// Conventional fallback shared with sqlx tooling.
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No database URL configured")]
    #[diagnostic(
        code(accounts::config::missing_url),
        help("Pass --database-url or set ACCOUNTS_DATABASE_URL (or DATABASE_URL).")
    )]
    MissingUrl,

    #[error("Unsupported database URL scheme: '{scheme}'")]
    #[diagnostic(
        code(accounts::config::unsupported_scheme),
        help("Use a sqlite: or postgres:// URL.")
    )]
    UnsupportedScheme { scheme: String },

    #[error("Invalid value for {field}: {message}")]
    #[diagnostic(code(accounts::config::invalid_value))]
    InvalidValue { field: &'static str, message: String },
}

/// Storage backend selected by the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let scheme = url.split_once(':').map(|(s, _)| s).unwrap_or(url);
        match scheme.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            other => Err(ConfigError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }
}

/// Connection and per-query settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub backend: Backend,
    pub max_connections: u32,
    /// Applied to every repository call; `None` waits indefinitely.
    pub query_timeout: Option<Duration>,
    /// Install the tracing query hook.
    pub log_queries: bool,
}

impl DatabaseConfig {
    /// Build a config from an explicit URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let backend = Backend::from_url(&url)?;
        Ok(Self {
            url,
            backend,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            query_timeout: None,
            log_queries: false,
        })
    }

    /// Resolve the URL from `explicit`, falling back to the process environment.
    pub fn from_env(explicit: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(explicit, |key| std::env::var(key).ok())
    }

    /// Resolve the URL from `explicit`, then `ACCOUNTS_DATABASE_URL`, then `DATABASE_URL`.
    pub fn from_lookup<F>(explicit: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = explicit
            .filter(|u| !u.trim().is_empty())
            .or_else(|| lookup(DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()))
            .or_else(|| lookup(FALLBACK_DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()))
            .ok_or(ConfigError::MissingUrl)?;

        Self::new(url)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Result<Self, ConfigError> {
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections",
                message: "must be at least 1".to_string(),
            });
        }
        self.max_connections = max_connections;
        Ok(self)
    }

    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_log_queries(mut self, log_queries: bool) -> Self {
        self.log_queries = log_queries;
        self
    }

    /// Fresh context for one repository call, carrying the configured timeout.
    pub fn query_context(&self) -> QueryContext {
        match self.query_timeout {
            Some(timeout) => QueryContext::new().with_timeout(timeout),
            None => QueryContext::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn backend_from_url_scheme() {
        assert_eq!(Backend::from_url("sqlite::memory:"), Ok(Backend::Sqlite));
        assert_eq!(
            Backend::from_url("sqlite://accounts.db"),
            Ok(Backend::Sqlite)
        );
        assert_eq!(
            Backend::from_url("postgres://u:p@localhost/awesome"),
            Ok(Backend::Postgres)
        );
        assert_eq!(
            Backend::from_url("postgresql://localhost/awesome"),
            Ok(Backend::Postgres)
        );
        assert_eq!(
            Backend::from_url("mysql://localhost/db"),
            Err(ConfigError::UnsupportedScheme {
                scheme: "mysql".to_string()
            })
        );
    }

    #[test]
    fn explicit_url_wins_over_environment() {
        let config = DatabaseConfig::from_lookup(
            Some("sqlite::memory:".to_string()),
            env(&[(DATABASE_URL_ENV, "postgres://ignored")]),
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
    }

    #[test]
    fn falls_back_to_accounts_env_then_generic_env() {
        let config = DatabaseConfig::from_lookup(
            None,
            env(&[
                (DATABASE_URL_ENV, "postgres://primary"),
                (FALLBACK_DATABASE_URL_ENV, "sqlite://fallback.db"),
            ]),
        )
        .unwrap();
        assert_eq!(config.url, "postgres://primary");

        let config = DatabaseConfig::from_lookup(
            None,
            env(&[(FALLBACK_DATABASE_URL_ENV, "sqlite://fallback.db")]),
        )
        .unwrap();
        assert_eq!(config.url, "sqlite://fallback.db");
    }

    #[test]
    fn blank_values_are_ignored() {
        let result = DatabaseConfig::from_lookup(Some("  ".to_string()), env(&[(DATABASE_URL_ENV, "")]));
        assert_eq!(result, Err(ConfigError::MissingUrl));
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        let result = DatabaseConfig::new("sqlite::memory:")
            .unwrap()
            .with_max_connections(0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "max_connections",
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = DatabaseConfig::new("sqlite::memory:")
            .unwrap()
            .with_query_timeout(Some(Duration::ZERO));
        assert_eq!(config.query_timeout, None);
    }
}

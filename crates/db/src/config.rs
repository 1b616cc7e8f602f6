//! Store selection and pool tuning, read from the environment.

use crate::error::DbError;

/// Used when `DATABASE_URL` is not set: a SQLite file in the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sales_estimation.db";

/// Which relational backend a [`DatabaseConfig`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Postgres,
    Sqlite,
}

impl DbBackend {
    /// Pick the backend from the URL scheme.
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            Err(DbError::Config(format!(
                "unsupported database scheme '{scheme}', expected postgres:// or sqlite:"
            )))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Connection settings for the backing store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a free connection before giving up.
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                        |
    /// |---------------------------------|--------------------------------|
    /// | `DATABASE_URL`                  | `sqlite://sales_estimation.db` |
    /// | `DATABASE_MAX_CONNECTIONS`      | `10`                           |
    /// | `DATABASE_ACQUIRE_TIMEOUT_SECS` | `5`                            |
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbError> {
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        DbBackend::from_url(&url)?;

        let max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            return Err(DbError::Config(
                "DATABASE_MAX_CONNECTIONS must be a positive integer, got '0'".into(),
            ));
        }
        let acquire_timeout_secs = parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?;

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
        })
    }

    /// Config for a private in-memory SQLite store.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }

    pub fn backend(&self) -> Result<DbBackend, DbError> {
        DbBackend::from_url(&self.url)
    }

    pub(crate) fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, DbError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DbError::Config(format!("{key} must be a positive integer, got '{raw}'"))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

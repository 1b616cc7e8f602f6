//! Connection pool and unit-of-work sessions.
//!
//! The service runs against PostgreSQL in production and a SQLite file during
//! local development. [`DbPool`] hides which one is in use; repositories open
//! a [`Session`] per operation and write their SQL once, using the
//! [`on_session`] macro to run it on whichever backend the session holds.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, Postgres, Sqlite, SqlitePool, Transaction};

use crate::config::{DatabaseConfig, DbBackend};
use crate::error::DbError;

static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Shared handle to the backing store. Cheap to clone.
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    pub fn backend(&self) -> DbBackend {
        match self {
            DbPool::Postgres(_) => DbBackend::Postgres,
            DbPool::Sqlite(_) => DbBackend::Sqlite,
        }
    }

    /// Open a unit of work bound to one transaction.
    ///
    /// Nothing is persisted until [`Session::commit`]. Dropping the session
    /// rolls back and hands the connection back to the pool.
    pub async fn begin(&self) -> Result<Session, sqlx::Error> {
        Ok(match self {
            DbPool::Postgres(pool) => Session::Postgres(pool.begin().await?),
            DbPool::Sqlite(pool) => Session::Sqlite(pool.begin().await?),
        })
    }

    /// Close every connection. Pending `begin` calls fail afterwards.
    pub async fn close(&self) {
        match self {
            DbPool::Postgres(pool) => pool.close().await,
            DbPool::Sqlite(pool) => pool.close().await,
        }
    }
}

/// One open transaction on either backend.
pub enum Session {
    Postgres(Transaction<'static, Postgres>),
    Sqlite(Transaction<'static, Sqlite>),
}

impl Session {
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        match self {
            Session::Postgres(tx) => tx.commit().await,
            Session::Sqlite(tx) => tx.commit().await,
        }
    }
}

/// Evaluate `$body` with `$conn` bound to the session's connection.
///
/// The body is expanded once per backend, so it must type-check against both
/// `PgConnection` and `SqliteConnection`.
macro_rules! on_session {
    ($session:expr, |$conn:ident| $body:expr) => {
        match $session {
            $crate::pool::Session::Postgres(tx) => {
                let $conn = &mut **tx;
                $body
            }
            $crate::pool::Session::Sqlite(tx) => {
                let $conn = &mut **tx;
                $body
            }
        }
    };
}

pub(crate) use on_session;

/// Create a connection pool for the configured backend.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, DbError> {
    let acquire_timeout = Duration::from_secs(config.acquire_timeout_secs);
    let backend = config.backend()?;
    tracing::debug!(
        backend = backend.as_str(),
        max_connections = config.max_connections,
        "Connecting to database"
    );

    match backend {
        DbBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(acquire_timeout)
                .connect(&config.url)
                .await?;
            Ok(DbPool::Postgres(pool))
        }
        DbBackend::Sqlite => {
            let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

            // Every connection to `:memory:` would otherwise see its own empty
            // database, so keep exactly one alive for the life of the pool.
            let pool = if config.is_in_memory() {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .acquire_timeout(acquire_timeout)
                    .connect_with(options)
                    .await?
            } else {
                SqlitePoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                    .await?
            };
            Ok(DbPool::Sqlite(pool))
        }
    }
}

/// Make sure the `estimation_requests` table exists.
///
/// Runs the embedded migrations for the pool's backend. Already-applied
/// migrations are skipped, so this is safe to call on every startup.
pub async fn initialize_schema(pool: &DbPool) -> Result<(), DbError> {
    match pool {
        DbPool::Postgres(p) => POSTGRES_MIGRATOR.run(p).await?,
        DbPool::Sqlite(p) => SQLITE_MIGRATOR.run(p).await?,
    }
    Ok(())
}

/// Round-trip a trivial query to verify the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    match pool {
        DbPool::Postgres(p) => {
            sqlx::query("SELECT 1").execute(p).await?;
        }
        DbPool::Sqlite(p) => {
            sqlx::query("SELECT 1").execute(p).await?;
        }
    }
    Ok(())
}

//! Error type for the persistence layer.

use estimation_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Domain failure: validation or a missing row.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store rejected or could not run a statement.
    #[error("Store error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for DbError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DbError::Core(CoreError::Validation(errors.to_string()))
    }
}

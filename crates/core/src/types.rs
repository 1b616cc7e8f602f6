/// Primary keys are `BIGSERIAL` on PostgreSQL and `INTEGER` on SQLite.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

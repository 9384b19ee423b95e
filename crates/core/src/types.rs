/// All database primary keys are PostgreSQL SERIAL/BIGSERIAL, widened to i64.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lookup-table ids (`order_statuses`, `response_kinds`) are SMALLSERIAL.
pub type StatusId = i16;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary values (wish prices, offer amounts) are fixed-point decimals
/// backed by `NUMERIC(12,2)` columns. Never use floats for money.
pub type Money = rust_decimal::Decimal;

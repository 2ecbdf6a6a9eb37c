/// Product primary keys are PostgreSQL BIGINT.
pub type DbId = i64;

use arrow::datatypes::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadTimeError {
    #[error("target weekday must be between 0 (Monday) and 6 (Sunday), got {index}")]
    InvalidWeekday { index: i64 },

    #[error("minimum offset must be a non-negative number of days, got {days}")]
    InvalidMinOffset { days: i64 },

    #[error("start and end sequences differ in length ({starts} vs {ends})")]
    LengthMismatch { starts: usize, ends: usize },

    #[error("column {0} not found in table")]
    ColumnNotFound(String),

    #[error("column {column} has unsupported type {data_type} for dates")]
    UnsupportedColumnType { column: String, data_type: DataType },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

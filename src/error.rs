use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("spreadsheet error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error("No valid holiday data found in file")]
    NoHolidays,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

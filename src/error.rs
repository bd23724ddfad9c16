use crate::config::ConfigError;
use crate::domain::EmployeeId;
use thiserror::Error;

/// Outcome of a failed record store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Employee with ID {0} not found")]
    NotFound(EmployeeId),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Failure that prevents the record store from being opened at all.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to connect to database at {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to initialize employee table: {0}")]
    Initialize(#[source] StoreError),
}

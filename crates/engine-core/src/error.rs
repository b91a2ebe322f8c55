use connectors::sql::base::error::{ConnectorError, DbError};
use model::{core::value::ValueError, execution::connection::ConnectionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Invalid connection settings: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Failed to connect to destination: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Errors raised while turning raw CSV records into typed batches.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Datetime column '{0}' is not present in the source header")]
    MissingColumn(String),

    #[error("Index column '{0}' collides with a source column")]
    IndexCollision(String),

    #[error("Row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: u64,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}, column '{column}': {source}")]
    InvalidValue {
        row: u64,
        column: String,
        #[source]
        source: ValueError,
    },
}

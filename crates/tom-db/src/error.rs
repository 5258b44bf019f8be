//! Backing-store error types.

use thiserror::Error;

/// Errors that can occur when talking to the backing store.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to execute a request.
    #[error("Request failed: {0}")]
    QueryError(String),

    /// Failed to deserialize a row.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),

    /// A row is missing a usable `id` column.
    #[error("Row in {0} has no id")]
    MissingId(String),

    /// No row with the given id.
    #[error("No row {id} in {table}")]
    NotFound { table: String, id: String },

    /// File storage failure.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::DeserializeError(e.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        DbError::StorageError(e.to_string())
    }
}

//! Backend trait implemented by every store the shop can talk to.

use async_trait::async_trait;

use crate::{DbError, Order, Row};

/// Generic row-and-file store (the hosted database-as-a-service seam).
///
/// Writes are last-write-wins; no backend offers transactions.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All rows of a table, optionally ordered. Unknown tables are empty.
    async fn select(&self, table: &str, order: Option<&Order>) -> Result<Vec<Row>, DbError>;

    /// Fetch one row by id.
    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, DbError>;

    /// Insert a row and return it as stored (with generated id and timestamps).
    async fn insert(&self, table: &str, row: Row) -> Result<Row, DbError>;

    /// Merge `patch` into the row with `id` and return the updated row.
    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<Row, DbError>;

    /// Delete a row. Returns whether a row was removed.
    async fn delete(&self, table: &str, id: &str) -> Result<bool, DbError>;

    /// Store a file in `bucket` at `path` and return its public URL.
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String, DbError>;
}

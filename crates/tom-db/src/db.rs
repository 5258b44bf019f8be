//! Typed facade over a [`Backend`].

use std::path::Path;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{Backend, DbError, FileBackend, MemoryBackend, Order, Row};

/// Handle to the backing store. Cheap to clone.
///
/// Provides typed reads and writes on top of the raw row interface.
#[derive(Clone)]
pub struct Db {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").finish_non_exhaustive()
    }
}

impl Db {
    /// Wrap any backend.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend.
    pub fn from_arc(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// An empty in-memory store.
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open a JSON document store.
    ///
    /// ```rust,ignore
    /// let db = Db::open_file(".tom/shop.json").await?;
    /// ```
    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Ok(Self::new(FileBackend::open(path).await?))
    }

    /// Raw rows of a table.
    pub async fn select(&self, table: &str, order: Option<&Order>) -> Result<Vec<Row>, DbError> {
        self.backend.select(table, order).await
    }

    /// Rows of a table deserialized into `T`.
    ///
    /// ```rust,ignore
    /// let rows: Vec<ProductRow> = db
    ///     .select_as("products", Some(&Order::desc("created_at")))
    ///     .await?;
    /// ```
    pub async fn select_as<T: DeserializeOwned>(
        &self,
        table: &str,
        order: Option<&Order>,
    ) -> Result<Vec<T>, DbError> {
        let rows = self.backend.select(table, order).await?;
        rows.iter().map(Row::deserialize).collect()
    }

    /// One row by id, deserialized.
    pub async fn get_as<T: DeserializeOwned>(&self, table: &str, id: &str) -> Result<Option<T>, DbError> {
        match self.backend.get(table, id).await? {
            Some(row) => Ok(Some(row.deserialize()?)),
            None => Ok(None),
        }
    }

    /// Insert a serializable value; returns the stored row deserialized.
    pub async fn insert_as<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        value: &T,
    ) -> Result<R, DbError> {
        let row = self.backend.insert(table, Row::from_serialize(value)?).await?;
        row.deserialize()
    }

    /// Patch the row `id` with the fields of a serializable value.
    pub async fn update_as<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        patch: &T,
    ) -> Result<R, DbError> {
        let row = self
            .backend
            .update(table, id, Row::from_serialize(patch)?)
            .await?;
        row.deserialize()
    }

    /// Delete a row; returns whether it existed.
    pub async fn delete(&self, table: &str, id: &str) -> Result<bool, DbError> {
        self.backend.delete(table, id).await
    }

    /// Upload a file and return its public URL.
    pub async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String, DbError> {
        self.backend.upload(bucket, path, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize)]
    struct NewCategory<'a> {
        name: &'a str,
        slug: &'a str,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct CategoryRow {
        id: String,
        name: String,
        slug: String,
    }

    #[tokio::test]
    async fn test_typed_roundtrip() {
        let db = Db::memory();
        let created: CategoryRow = db
            .insert_as("categories", &NewCategory { name: "Slides", slug: "slides" })
            .await
            .unwrap();
        assert_eq!(created.slug, "slides");

        let renamed: CategoryRow = db
            .update_as("categories", &created.id, &serde_json::json!({ "name": "Summer Slides" }))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Summer Slides");
        assert_eq!(renamed.slug, "slides");

        let all: Vec<CategoryRow> = db.select_as("categories", None).await.unwrap();
        assert_eq!(all, vec![renamed]);

        assert!(db.delete("categories", &created.id).await.unwrap());
        let gone: Option<CategoryRow> = db.get_as("categories", &created.id).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_bad_rows_surface_as_deserialize_errors() {
        let db = Db::memory();
        db.insert_as::<_, serde_json::Value>("categories", &serde_json::json!({ "name": 5 }))
            .await
            .unwrap();
        let result: Result<Vec<CategoryRow>, _> = db.select_as("categories", None).await;
        assert!(matches!(result, Err(DbError::DeserializeError(_))));
    }
}

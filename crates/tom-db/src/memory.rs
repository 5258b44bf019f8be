//! In-memory backend, used by tests and as the core of the file backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{Backend, DbError, Order, Row, ID_COLUMN};

/// Tables as stored: rows kept in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Tables {
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<Row>>,
}

impl Tables {
    fn table(&self, name: &str) -> &[Row] {
        self.tables.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Backend holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<Tables>,
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-loaded with tables.
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            data: RwLock::new(tables),
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of all tables.
    pub async fn snapshot(&self) -> Tables {
        self.data.read().await.clone()
    }

    /// Replace all tables with `tables`.
    pub(crate) async fn restore(&self, tables: Tables) {
        *self.data.write().await = tables;
    }

    /// Bytes of an uploaded file, keyed by `bucket/path`.
    pub async fn file(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(&format!("{bucket}/{path}")).cloned()
    }
}

/// Generate a row id.
pub(crate) fn generate_id() -> String {
    use rand::Rng;
    let bytes: [u8; 8] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn select(&self, table: &str, order: Option<&Order>) -> Result<Vec<Row>, DbError> {
        let data = self.data.read().await;
        let mut rows = data.table(table).to_vec();
        if let Some(order) = order {
            rows.sort_by(|a, b| order.compare(a, b));
        }
        Ok(rows)
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, DbError> {
        let data = self.data.read().await;
        Ok(data
            .table(table)
            .iter()
            .find(|r| r.id().as_deref() == Some(id))
            .cloned())
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, DbError> {
        let mut data = self.data.write().await;
        let rows = data.tables.entry(table.to_string()).or_default();

        let id = match row.id() {
            Some(id) => id,
            None => {
                let id = generate_id();
                row.set(ID_COLUMN, id.clone());
                id
            }
        };
        if rows.iter().any(|r| r.id().as_deref() == Some(id.as_str())) {
            return Err(DbError::QueryError(format!("duplicate id {id} in {table}")));
        }

        let now = now_timestamp();
        if row.get("created_at").map_or(true, |v| v.is_null()) {
            row.set("created_at", now.clone());
        }
        row.set("updated_at", now);

        rows.push(row.clone());
        tracing::debug!(table, id = %id, "row inserted");
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, mut patch: Row) -> Result<Row, DbError> {
        let mut data = self.data.write().await;
        let row = data
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.id().as_deref() == Some(id)))
            .ok_or_else(|| DbError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        // The id column is immutable.
        patch.set(ID_COLUMN, id.to_string());
        row.merge(patch);
        row.set("updated_at", now_timestamp());
        tracing::debug!(table, id, "row updated");
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, DbError> {
        let mut data = self.data.write().await;
        let Some(rows) = data.tables.get_mut(table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| r.id().as_deref() != Some(id));
        let removed = rows.len() < before;
        tracing::debug!(table, id, removed, "row delete");
        Ok(removed)
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String, DbError> {
        let key = format!("{bucket}/{path}");
        self.files.write().await.insert(key.clone(), bytes);
        Ok(format!("memory://{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert("products", row! { "name" => "Blue Bow Slides", "price" => 26.0 })
            .await
            .unwrap();

        let id = row.id().unwrap();
        assert_eq!(id.len(), 16);
        assert!(row.get("created_at").is_some());
        assert!(row.get("updated_at").is_some());
        assert_eq!(backend.get("products", &id).await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let backend = MemoryBackend::new();
        backend.insert("categories", row! { "id" => "c1" }).await.unwrap();
        let err = backend.insert("categories", row! { "id" => "c1" }).await;
        assert!(matches!(err, Err(DbError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_select_ordered() {
        let backend = MemoryBackend::new();
        for (id, created) in [("a", "2026-01-01T00:00:00Z"), ("b", "2026-01-03T00:00:00Z"), ("c", "2026-01-02T00:00:00Z")] {
            backend
                .insert("products", row! { "id" => id, "created_at" => created })
                .await
                .unwrap();
        }

        let rows = backend
            .select("products", Some(&Order::desc("created_at")))
            .await
            .unwrap();
        let ids: Vec<String> = rows.iter().filter_map(Row::id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        assert!(backend.select("missing", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_id() {
        let backend = MemoryBackend::new();
        backend
            .insert("products", row! { "id" => "p1", "price" => 28.0, "name" => "Slides" })
            .await
            .unwrap();

        let updated = backend
            .update("products", "p1", row! { "price" => 30.0, "id" => "hijack" })
            .await
            .unwrap();
        assert_eq!(updated.get("price"), Some(&json!(30.0)));
        assert_eq!(updated.get("name"), Some(&json!("Slides")));
        assert_eq!(updated.id().as_deref(), Some("p1"));

        let missing = backend.update("products", "nope", Row::new()).await;
        assert!(matches!(missing, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let backend = MemoryBackend::new();
        backend.insert("products", row! { "id" => "p1" }).await.unwrap();
        assert!(backend.delete("products", "p1").await.unwrap());
        assert!(!backend.delete("products", "p1").await.unwrap());
        assert!(!backend.delete("nothing", "p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_upload() {
        let backend = MemoryBackend::new();
        let url = backend
            .upload("products", "product-images/a.png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "memory://products/product-images/a.png");
        assert_eq!(backend.file("products", "product-images/a.png").await, Some(vec![1, 2, 3]));
    }
}

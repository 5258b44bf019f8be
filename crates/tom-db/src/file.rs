//! Backend persisted as a JSON document on disk.
//!
//! Used for offline sessions and the admin CLI. Uploaded files land in an
//! `uploads/` directory next to the document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::memory::{MemoryBackend, Tables};
use crate::{Backend, DbError, Order, Row};

/// File-backed store. Every successful write rewrites the document.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    uploads_dir: PathBuf,
    inner: MemoryBackend,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileBackend {
    /// Open (or start) the document at `path`. A missing file is an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();
        let tables = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Tables::default(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DbError::OpenError(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(DbError::OpenError(format!("{}: {e}", path.display()))),
        };

        let uploads_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join("uploads");

        tracing::debug!(path = %path.display(), tables = tables.tables.len(), "opened file store");
        Ok(Self {
            path,
            uploads_dir,
            inner: MemoryBackend::with_tables(tables),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist after a write, rolling memory back to `before` if the file
    /// cannot be written.
    async fn commit(&self, before: Tables) -> Result<(), DbError> {
        if let Err(e) = self.persist().await {
            tracing::warn!(path = %self.path.display(), error = %e, "write failed, changes rolled back");
            self.inner.restore(before).await;
            return Err(e);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), DbError> {
        let snapshot = self.inner.snapshot().await;
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for FileBackend {
    async fn select(&self, table: &str, order: Option<&Order>) -> Result<Vec<Row>, DbError> {
        self.inner.select(table, order).await
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, DbError> {
        self.inner.get(table, id).await
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row, DbError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let row = self.inner.insert(table, row).await?;
        self.commit(before).await?;
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<Row, DbError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let row = self.inner.update(table, id, patch).await?;
        self.commit(before).await?;
        Ok(row)
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, DbError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let removed = self.inner.delete(table, id).await?;
        if removed {
            self.commit(before).await?;
        }
        Ok(removed)
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String, DbError> {
        if path.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(DbError::StorageError(format!("invalid upload path: {path}")));
        }
        let target = self.uploads_dir.join(bucket).join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(format!("file://{}", target.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("shop.json")).await.unwrap();
        assert!(backend.select("products", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("shop.json");

        let backend = FileBackend::open(&path).await.unwrap();
        backend
            .insert("products", row! { "id" => "p1", "name" => "Beret", "price" => 22.0 })
            .await
            .unwrap();
        backend
            .update("products", "p1", row! { "price" => 24.0 })
            .await
            .unwrap();
        drop(backend);

        let reopened = FileBackend::open(&path).await.unwrap();
        let row = reopened.get("products", "p1").await.unwrap().unwrap();
        assert_eq!(row.get("price"), Some(&serde_json::json!(24.0)));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        let backend = FileBackend::open(data_dir.join("shop.json")).await.unwrap();
        backend
            .insert("products", row! { "id" => "p1", "name" => "Beret" })
            .await
            .unwrap();

        // A plain file where the directory was makes every write fail.
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, b"").unwrap();

        assert!(backend
            .insert("products", row! { "id" => "p2", "name" => "Slides" })
            .await
            .is_err());
        assert!(backend
            .update("products", "p1", row! { "name" => "Tote" })
            .await
            .is_err());
        assert!(backend.delete("products", "p1").await.is_err());

        let rows = backend.select("products", None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&serde_json::json!("Beret")));
    }

    #[tokio::test]
    async fn test_corrupt_document_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(matches!(FileBackend::open(&path).await, Err(DbError::OpenError(_))));
    }

    #[tokio::test]
    async fn test_upload_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("shop.json")).await.unwrap();

        let url = backend
            .upload("products", "product-images/x.png", b"png".to_vec())
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        let stored = dir.path().join("uploads/products/product-images/x.png");
        assert_eq!(std::fs::read(stored).unwrap(), b"png");

        assert!(backend.upload("products", "../escape.png", vec![]).await.is_err());
    }
}

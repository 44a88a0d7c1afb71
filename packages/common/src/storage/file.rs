use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::StorageError;
use super::table::{Table, TableDocument};
use super::traits::{Record, RecordStore};
use crate::record::RecordId;

/// Filesystem-backed record store.
///
/// Each table is a single JSON document at `{base_path}/{table}.json` holding
/// the id counter and every record. Writes go to `{base_path}/.tmp` first and
/// are renamed into place, so a failed write leaves the previous table intact.
pub struct FileRecordStore<T> {
    table: String,
    base_path: PathBuf,
    inner: Mutex<Table<T>>,
}

impl<T: Record> FileRecordStore<T> {
    /// Open (or create) the table, loading any existing contents.
    pub async fn open(
        base_path: impl Into<PathBuf>,
        table: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        let table = table.into();

        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;

        let path = table_path(&base_path, &table);
        let contents = match fs::read(&path).await {
            Ok(bytes) => {
                let doc: TableDocument<T> =
                    serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                        table: table.clone(),
                        source,
                    })?;
                Table::from_document(doc)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(e.into()),
        };

        info!(table = %table, records = contents.len(), "Opened record store");

        Ok(Self {
            table,
            base_path,
            inner: Mutex::new(contents),
        })
    }

    /// Path of the JSON document backing this table.
    pub fn path(&self) -> PathBuf {
        table_path(&self.base_path, &self.table)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    async fn persist(&self, table: &Table<T>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&table.snapshot())?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.path()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(table = %self.table, bytes = bytes.len(), "Persisted table");
        Ok(())
    }
}

fn table_path(base_path: &Path, table: &str) -> PathBuf {
    base_path.join(format!("{table}.json"))
}

#[async_trait]
impl<T: Record> RecordStore<T> for FileRecordStore<T> {
    fn table(&self) -> &str {
        &self.table
    }

    async fn insert(&self, draft: T::Draft) -> Result<RecordId, StorageError> {
        let mut table = self.inner.lock().await;
        let id = table.insert(draft);
        if let Err(e) = self.persist(&table).await {
            table.rollback_insert(id);
            return Err(e);
        }
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.inner.lock().await.list())
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, StorageError> {
        Ok(self.inner.lock().await.get(id).cloned())
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StorageError> {
        let mut table = self.inner.lock().await;
        let Some(removed) = table.remove(id) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&table).await {
            table.restore(removed);
            return Err(e);
        }
        Ok(true)
    }

    async fn len(&self) -> Result<usize, StorageError> {
        Ok(self.inner.lock().await.len())
    }
}

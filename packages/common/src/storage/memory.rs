use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::table::Table;
use super::traits::{Record, RecordStore};
use crate::record::RecordId;

/// Volatile record store. Contents live as long as the process.
pub struct MemoryRecordStore<T> {
    table: String,
    inner: RwLock<Table<T>>,
}

impl<T: Record> MemoryRecordStore<T> {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            inner: RwLock::new(Table::new()),
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryRecordStore<T> {
    fn table(&self) -> &str {
        &self.table
    }

    async fn insert(&self, draft: T::Draft) -> Result<RecordId, StorageError> {
        Ok(self.inner.write().await.insert(draft))
    }

    async fn list_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.inner.read().await.list())
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, StorageError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StorageError> {
        Ok(self.inner.write().await.remove(id).is_some())
    }

    async fn len(&self) -> Result<usize, StorageError> {
        Ok(self.inner.read().await.len())
    }
}

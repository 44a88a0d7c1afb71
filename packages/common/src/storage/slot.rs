use std::sync::Arc;

use tokio::sync::OnceCell;

use super::error::StorageError;
use super::traits::{Record, RecordStore};

/// A store handle that may still be opening.
///
/// Stores are opened asynchronously at start-up. Until one is attached, readers
/// see nothing and writers get [`StorageError::Unavailable`].
pub struct StoreSlot<T: Record> {
    table: String,
    cell: OnceCell<Arc<dyn RecordStore<T>>>,
}

impl<T: Record> StoreSlot<T> {
    /// A slot whose store has not been opened yet.
    pub fn pending(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            cell: OnceCell::new(),
        }
    }

    /// A slot with its store already open.
    pub fn ready(store: Arc<dyn RecordStore<T>>) -> Self {
        Self {
            table: store.table().to_string(),
            cell: OnceCell::new_with(Some(store)),
        }
    }

    /// Attach the opened store. Returns `false` if one was already attached.
    pub fn attach(&self, store: Arc<dyn RecordStore<T>>) -> bool {
        self.cell.set(store).is_ok()
    }

    pub fn get(&self) -> Option<&Arc<dyn RecordStore<T>>> {
        self.cell.get()
    }

    /// The attached store, or `Unavailable`.
    pub fn require(&self) -> Result<&Arc<dyn RecordStore<T>>, StorageError> {
        self.cell
            .get()
            .ok_or_else(|| StorageError::Unavailable(self.table.clone()))
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

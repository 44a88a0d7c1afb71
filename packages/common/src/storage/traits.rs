use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::StorageError;
use crate::record::{Origin, RecordId};

/// A record shape that can live in a [`RecordStore`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Validated input the store turns into a record once it has an id.
    type Draft: Send + 'static;

    /// The store this record type belongs to.
    const ORIGIN: Origin;

    fn id(&self) -> RecordId;

    /// Raw `fecha` string as persisted.
    fn date(&self) -> &str;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;
}

/// A persistent table of one record type with auto-assigned ids.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Table name, used in logs and errors.
    fn table(&self) -> &str;

    /// Persist a new record and return its id.
    ///
    /// Never overwrites an existing record. On failure nothing is persisted.
    async fn insert(&self, draft: T::Draft) -> Result<RecordId, StorageError>;

    /// All records currently persisted, in ascending id order.
    async fn list_all(&self) -> Result<Vec<T>, StorageError>;

    /// Fetch one record. `Ok(None)` if the id is unknown.
    async fn get(&self, id: RecordId) -> Result<Option<T>, StorageError>;

    /// Delete one record.
    ///
    /// Returns `true` if the record was deleted, `false` if it did not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, StorageError>;

    /// Number of records in the table.
    async fn len(&self) -> Result<usize, StorageError> {
        Ok(self.list_all().await?.len())
    }
}

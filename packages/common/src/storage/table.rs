use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::traits::Record;
use crate::record::RecordId;

/// In-memory contents of one table, shared by every store backend.
#[derive(Debug, Clone)]
pub(crate) struct Table<T> {
    next_id: RecordId,
    records: BTreeMap<RecordId, T>,
}

impl<T: Record> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, draft: T::Draft) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(id, T::from_draft(id, draft));
        id
    }

    /// Undo the most recent [`Table::insert`] after a failed write.
    pub(crate) fn rollback_insert(&mut self, id: RecordId) {
        self.records.remove(&id);
        if self.next_id == id + 1 {
            self.next_id = id;
        }
    }

    pub(crate) fn remove(&mut self, id: RecordId) -> Option<T> {
        self.records.remove(&id)
    }

    /// Put back a record removed by [`Table::remove`] after a failed write.
    pub(crate) fn restore(&mut self, record: T) {
        self.records.insert(record.id(), record);
    }

    pub(crate) fn get(&self, id: RecordId) -> Option<&T> {
        self.records.get(&id)
    }

    pub(crate) fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn snapshot(&self) -> TableSnapshot<'_, T> {
        TableSnapshot {
            next_id: self.next_id,
            records: self.records.values().collect(),
        }
    }

    pub(crate) fn from_document(doc: TableDocument<T>) -> Self {
        let records: BTreeMap<RecordId, T> =
            doc.records.into_iter().map(|r| (r.id(), r)).collect();
        // Never hand out an id that is already on disk, even if the counter was edited.
        let floor = records.keys().next_back().map_or(1, |max| max + 1);
        Self {
            next_id: doc.next_id.max(floor),
            records,
        }
    }
}

/// Borrowed on-disk form of a table.
#[derive(Serialize)]
pub(crate) struct TableSnapshot<'a, T> {
    next_id: RecordId,
    records: Vec<&'a T>,
}

/// Owned on-disk form of a table.
#[derive(Deserialize)]
pub(crate) struct TableDocument<T> {
    next_id: RecordId,
    records: Vec<T>,
}

use std::sync::Arc;

use common::config::{StorageAppConfig, StorageBackend};
use common::storage::{
    FileRecordStore, MemoryRecordStore, Record, RecordStore, StorageError, StoreSlot,
};
use common::{Announcement, Course, Publication};
use tracing::{error, info};

/// Handles to the three record stores.
///
/// Built once at start-up and passed to whatever needs store access. Slots may
/// still be empty while the stores open.
pub struct AppContext {
    pub publications: StoreSlot<Publication>,
    pub announcements: StoreSlot<Announcement>,
    pub courses: StoreSlot<Course>,
}

impl AppContext {
    /// A context whose stores have not been opened yet.
    pub fn pending(config: &StorageAppConfig) -> Self {
        Self {
            publications: StoreSlot::pending(&config.publications_table),
            announcements: StoreSlot::pending(&config.announcements_table),
            courses: StoreSlot::pending(&config.courses_table),
        }
    }

    /// A context over already opened stores.
    pub fn from_stores(
        publications: Arc<dyn RecordStore<Publication>>,
        announcements: Arc<dyn RecordStore<Announcement>>,
        courses: Arc<dyn RecordStore<Course>>,
    ) -> Self {
        Self {
            publications: StoreSlot::ready(publications),
            announcements: StoreSlot::ready(announcements),
            courses: StoreSlot::ready(courses),
        }
    }

    /// Volatile stores with the default table names.
    pub fn in_memory() -> Self {
        let config = StorageAppConfig::default();
        Self::from_stores(
            Arc::new(MemoryRecordStore::<Publication>::new(
                config.publications_table,
            )),
            Arc::new(MemoryRecordStore::<Announcement>::new(
                config.announcements_table,
            )),
            Arc::new(MemoryRecordStore::<Course>::new(config.courses_table)),
        )
    }

    /// Open all three stores concurrently and attach them.
    ///
    /// A store that fails to open stays unavailable while the others are
    /// attached. The first failure is returned.
    pub async fn connect(&self, config: &StorageAppConfig) -> Result<(), StorageError> {
        let (publications, announcements, courses) = tokio::join!(
            open_store::<Publication>(config, &config.publications_table),
            open_store::<Announcement>(config, &config.announcements_table),
            open_store::<Course>(config, &config.courses_table),
        );

        let failures = [
            attach(&self.publications, publications),
            attach(&self.announcements, announcements),
            attach(&self.courses, courses),
        ];

        match failures.into_iter().flatten().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Whether every store is open.
    pub fn is_ready(&self) -> bool {
        self.publications.is_ready() && self.announcements.is_ready() && self.courses.is_ready()
    }
}

async fn open_store<T: Record>(
    config: &StorageAppConfig,
    table: &str,
) -> Result<Arc<dyn RecordStore<T>>, StorageError> {
    match config.backend {
        StorageBackend::File => {
            let store = FileRecordStore::<T>::open(&config.data_dir, table).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryRecordStore::<T>::new(table))),
    }
}

fn attach<T: Record>(
    slot: &StoreSlot<T>,
    opened: Result<Arc<dyn RecordStore<T>>, StorageError>,
) -> Option<StorageError> {
    match opened {
        Ok(store) => {
            if slot.attach(store) {
                info!(table = %slot.table(), origin = T::ORIGIN.as_str(), "Store ready");
            }
            None
        }
        Err(e) => {
            error!(table = %slot.table(), error = %e, "Failed to open store");
            Some(e)
        }
    }
}

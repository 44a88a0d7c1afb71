mod error;
mod slot;
mod table;
mod traits;

pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use slot::StoreSlot;
pub use traits::{Record, RecordStore};

use common::storage::StorageError;
use common::{Origin, RecordId};
use thiserror::Error;

/// A form was rejected before touching any store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field `{0}` is required")]
    Missing(&'static str),

    #[error("Field `{field}` has an unsupported value: {value}")]
    Unsupported { field: &'static str, value: String },

    #[error("Field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No {origin} with id {id}")]
    NotFound { origin: Origin, id: RecordId },
}

pub type Result<T> = std::result::Result<T, PortalError>;

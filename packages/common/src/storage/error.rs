use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store has not finished opening, or failed to open.
    #[error("store `{0}` is not available")]
    Unavailable(String),

    /// The table file exists but could not be decoded.
    #[error("table `{table}` is corrupt: {source}")]
    Corrupt {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

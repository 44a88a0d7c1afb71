use std::path::PathBuf;

use serde::Deserialize;

/// Which record store implementation backs the three tables.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON documents under `data_dir`.
    File,
    /// Process memory only. Nothing survives a restart.
    Memory,
}

/// App-level storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    /// Store implementation. Default: "file".
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Directory holding the table files. Default: "./data".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Table holding publications. Default: "publicaciones".
    #[serde(default = "default_publications_table")]
    pub publications_table: String,
    /// Table holding courses and seminars. Default: "cursos".
    #[serde(default = "default_courses_table")]
    pub courses_table: String,
    /// Table holding competition announcements. Default: "icpc".
    #[serde(default = "default_announcements_table")]
    pub announcements_table: String,
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_publications_table() -> String {
    "publicaciones".into()
}
fn default_courses_table() -> String {
    "cursos".into()
}
fn default_announcements_table() -> String {
    "icpc".into()
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            publications_table: default_publications_table(),
            courses_table: default_courses_table(),
            announcements_table: default_announcements_table(),
        }
    }
}

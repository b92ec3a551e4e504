use serde::Deserialize;

/// Which key-value slot backend holds the photo collection.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per slot under the storage path
    #[default]
    File,
    /// A SQLite database under the storage path
    Database,
}

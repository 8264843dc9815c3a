use std::path::PathBuf;

use crate::constants::store::{DEFAULT_CLEANED_FILENAME, DEFAULT_STORE_FILENAME};
use crate::store::JsonFileStore;

/// Where the pipeline reads and writes, and how it guards the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Catalog file holding the JSON array of records.
    pub store_path: PathBuf,
    /// Destination of the cleanup pass; never the catalog itself.
    pub cleaned_path: PathBuf,
    /// CI environment file that receives hand-off variables, if any.
    pub env_file: Option<PathBuf>,
    /// Hold an exclusive lock file while appending.
    ///
    /// The pipeline normally runs as a single CI job, so this is off unless
    /// writers may overlap.
    pub exclusive_lock: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILENAME),
            cleaned_path: PathBuf::from(DEFAULT_CLEANED_FILENAME),
            env_file: None,
            exclusive_lock: false,
        }
    }
}

impl PipelineConfig {
    /// File store configured from this config.
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_path).with_exclusive_lock(self.exclusive_lock)
    }
}

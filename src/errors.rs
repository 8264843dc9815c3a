use std::io;

use thiserror::Error;

use crate::types::RecordId;

/// Error type for submission validation, decoding, and store persistence failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required submission fields were absent or blank.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },
    /// Hand-off payload could not be decoded into a record.
    #[error("failed to decode canonical record: {0}")]
    Decode(String),
    /// The store already holds an entry with this id.
    #[error(
        "duplicate sunscreen detected: an entry with id '{id}' already exists; no data was written and the submission requires manual review"
    )]
    DuplicateRecord { id: RecordId },
    /// Catalog file could not be read, parsed, or rewritten.
    #[error("store failure: {0}")]
    StoreIo(String),
    /// Persisted entries failed the structural check.
    #[error("schema validation failed with {count} error(s)")]
    Schema { count: usize, details: Vec<String> },
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Inconsistent pipeline settings.
    #[error("configuration error: {0}")]
    Configuration(String),
}

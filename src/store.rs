//! Catalog persistence: duplicate-rejecting append and whole-file JSON stores.
//!
//! The store is always read in full, extended in memory, and rewritten in
//! full. File writes go to a temp sibling that is synced and renamed over the
//! destination, so a failed write never leaves a truncated catalog behind.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::store::{LOCK_SUFFIX, TEMP_SUFFIX};
use crate::data::CanonicalRecord;
use crate::errors::CatalogError;

/// Append `record` unless its id is already present.
///
/// On a duplicate the error names the id and `store` is left as it was.
pub fn append_record(
    store: &mut Vec<CanonicalRecord>,
    record: CanonicalRecord,
) -> Result<(), CatalogError> {
    if store.iter().any(|existing| existing.id == record.id) {
        warn!(id = %record.id, "rejected duplicate catalog entry");
        return Err(CatalogError::DuplicateRecord { id: record.id });
    }
    store.push(record);
    Ok(())
}

/// Append `record` to raw catalog entries unless an entry carries its id.
///
/// Existing entries are never decoded, so older shapes pass through as-is.
pub fn append_entry(entries: &mut Vec<Value>, record: &CanonicalRecord) -> Result<(), CatalogError> {
    let taken = entries
        .iter()
        .any(|entry| entry.get("id").and_then(Value::as_str) == Some(record.id.as_str()));
    if taken {
        warn!(id = %record.id, "rejected duplicate catalog entry");
        return Err(CatalogError::DuplicateRecord {
            id: record.id.clone(),
        });
    }
    let value = serde_json::to_value(record)
        .map_err(|err| CatalogError::StoreIo(format!("failed to encode record: {err}")))?;
    entries.push(value);
    Ok(())
}

/// Backend holding the full catalog.
pub trait RecordStore {
    /// Read every record, in stored order.
    fn load(&self) -> Result<Vec<CanonicalRecord>, CatalogError>;
    /// Replace the stored catalog with `records`.
    fn save(&self, records: &[CanonicalRecord]) -> Result<(), CatalogError>;

    /// Writer lock held across [`RecordStore::append`]; none by default.
    fn guard(&self) -> Result<Option<StoreLock>, CatalogError> {
        Ok(None)
    }

    /// Read, append with duplicate rejection, and rewrite; returns the new total.
    ///
    /// Nothing is written when the id already exists.
    fn append(&self, record: CanonicalRecord) -> Result<usize, CatalogError> {
        let _guard = self.guard()?;
        let mut updated = self.load()?;
        let id = record.id.clone();
        append_record(&mut updated, record)?;
        self.save(&updated)?;
        info!(%id, total = updated.len(), "appended catalog entry");
        Ok(updated.len())
    }
}

/// In-memory catalog used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<CanonicalRecord>>,
}

impl MemoryStore {
    /// Create a store pre-populated with `records`.
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Vec<CanonicalRecord>, CatalogError> {
        self.records
            .read()
            .map_err(|_| CatalogError::StoreIo("memory store lock poisoned".into()))
            .map(|guard| guard.clone())
    }

    fn save(&self, records: &[CanonicalRecord]) -> Result<(), CatalogError> {
        *self
            .records
            .write()
            .map_err(|_| CatalogError::StoreIo("memory store lock poisoned".into()))? =
            records.to_vec();
        Ok(())
    }
}

/// Catalog persisted as one pretty-printed JSON array.
pub struct JsonFileStore {
    path: PathBuf,
    exclusive: bool,
}

impl fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("exclusive", &self.exclusive)
            .finish()
    }
}

impl JsonFileStore {
    /// Store backed by `path`; the file need not exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            exclusive: false,
        }
    }

    /// Hold an exclusive lock file around each read-append-write.
    pub fn with_exclusive_lock(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw JSON entries without imposing the record shape.
    pub fn load_entries(&self) -> Result<Vec<Value>, CatalogError> {
        read_json_array(&self.path)
    }

    /// Acquire the writer lock for this store.
    pub fn lock(&self) -> Result<StoreLock, CatalogError> {
        StoreLock::acquire(&self.path)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CanonicalRecord>, CatalogError> {
        let records: Vec<CanonicalRecord> = read_json_array(&self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "loaded catalog");
        Ok(records)
    }

    fn save(&self, records: &[CanonicalRecord]) -> Result<(), CatalogError> {
        write_json_atomic(&self.path, records)
    }

    fn guard(&self) -> Result<Option<StoreLock>, CatalogError> {
        if self.exclusive {
            self.lock().map(Some)
        } else {
            Ok(None)
        }
    }

    fn append(&self, record: CanonicalRecord) -> Result<usize, CatalogError> {
        let _guard = self.guard()?;
        let mut entries = self.load_entries()?;
        append_entry(&mut entries, &record)?;
        write_json_atomic(&self.path, &entries)?;
        info!(id = %record.id, total = entries.len(), "appended catalog entry");
        Ok(entries.len())
    }
}

/// Exclusive writer lock; the lock file is removed on drop.
#[derive(Debug)]
pub struct StoreLock {
    lock_path: PathBuf,
}

impl StoreLock {
    /// Create `<store>.lock`, failing if another writer already holds it.
    pub fn acquire(store_path: &Path) -> Result<Self, CatalogError> {
        let lock_path = sibling_path(store_path, LOCK_SUFFIX);
        ensure_parent_dir(&lock_path)?;
        match OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&lock_path)
        {
            Ok(_) => Ok(Self { lock_path }),
            Err(err) => Err(CatalogError::StoreIo(format!(
                "failed to acquire store lock {}: {err}",
                lock_path.display()
            ))),
        }
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Read a JSON array from `path`; a missing file is an empty array.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(CatalogError::StoreIo(format!(
                "failed to read {}: {err}",
                path.display()
            )));
        }
    };
    let value: Value = serde_json::from_str(&text).map_err(|err| {
        CatalogError::StoreIo(format!("failed to parse {}: {err}", path.display()))
    })?;
    if !value.is_array() {
        return Err(CatalogError::StoreIo(format!(
            "{} is not an array",
            path.display()
        )));
    }
    serde_json::from_value(value).map_err(|err| {
        CatalogError::StoreIo(format!(
            "{} holds a malformed entry: {err}",
            path.display()
        ))
    })
}

/// Pretty-print `value` (two-space indent, trailing newline) and atomically
/// replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| CatalogError::StoreIo(format!("failed to encode catalog: {err}")))?;
    bytes.push(b'\n');
    ensure_parent_dir(path)?;
    let tmp_path = sibling_path(path, TEMP_SUFFIX);
    if let Err(err) = write_and_sync(&tmp_path, &bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(map_write_err(path, err));
    }
    fs::rename(&tmp_path, path).map_err(|err| {
        let _ = fs::remove_file(&tmp_path);
        map_write_err(path, err)
    })
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn ensure_parent_dir(path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| map_write_err(parent, err))?;
    }
    Ok(())
}

fn map_write_err(path: &Path, err: io::Error) -> CatalogError {
    CatalogError::StoreIo(format!("failed to write {}: {err}", path.display()))
}

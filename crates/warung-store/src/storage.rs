//! # Storage Backends
//!
//! The document store: three named JSON collections with whole-collection
//! read/replace semantics.
//!
//! ## Commit Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Multi-Collection Commit                              │
//! │                                                                         │
//! │  ❌ WRONG: sequential writes (crash can strand half the commit)        │
//! │     write(products);  ← crash here loses the transaction               │
//! │     write(transactions);                                                │
//! │                                                                         │
//! │  ✅ CORRECT: one WriteBatch applied atomically                         │
//! │     batch.put(products).put(transactions);                              │
//! │     storage.commit(batch);                                              │
//! │                                                                         │
//! │  The file backend rewrites a single backing document through a temp    │
//! │  file + rename, so a crash leaves either the old or the new state,     │
//! │  never a mixture.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collections
// =============================================================================

/// The three named collections of the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Transactions,
    Customers,
}

impl Collection {
    /// All collections, in document order.
    pub const ALL: [Collection; 3] = [
        Collection::Products,
        Collection::Transactions,
        Collection::Customers,
    ];

    /// The key under which this collection is stored.
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Transactions => "transactions",
            Collection::Customers => "customers",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Write Batch
// =============================================================================

/// Full replacement lists for one or more collections, applied together.
///
/// Built in memory by the service layer and handed to [`Storage::commit`];
/// a batch is either applied completely or not at all.
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(Collection, Vec<Value>)>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        WriteBatch::default()
    }

    /// Adds a full replacement list for `collection`.
    ///
    /// A later put for the same collection wins over an earlier one.
    pub fn put<T: Serialize>(mut self, collection: Collection, records: &[T]) -> StoreResult<Self> {
        let values = records
            .iter()
            .map(|r| {
                serde_json::to_value(r).map_err(|source| StoreError::Encode {
                    collection: collection.name(),
                    source,
                })
            })
            .collect::<StoreResult<Vec<Value>>>()?;
        self.entries.push((collection, values));
        Ok(self)
    }

    /// The staged replacement lists.
    pub fn entries(&self) -> &[(Collection, Vec<Value>)] {
        &self.entries
    }

    /// Checks whether nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Storage Trait
// =============================================================================

/// Whole-collection read/replace storage.
///
/// No query language: callers read a full collection, transform it in
/// memory, and commit full replacement lists. An absent collection reads
/// as an empty list (lazy initialization), never an error.
pub trait Storage: Send + Sync {
    /// Reads every record of `collection`; empty list when absent.
    fn read(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    /// Applies a batch of full-collection replacements atomically.
    fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Volatile backend holding the collections in a map.
///
/// The default backend for tests and for callers that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        // A poisoned lock still holds a consistent map (commits replace
        // whole collections), so recover rather than panic.
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (collection, values) in batch.entries {
            debug!(collection = %collection, records = values.len(), "Committing collection");
            collections.insert(collection, values);
        }
        Ok(())
    }
}

// =============================================================================
// JSON File Backend
// =============================================================================

/// File backend: one JSON document holding all three collections.
///
/// ## Document Layout
/// ```json
/// {
///   "products":     [ ... ],
///   "transactions": [ ... ],
///   "customers":    [ ... ]
/// }
/// ```
///
/// Reads load the document fresh from disk; commits rewrite it through a
/// sibling temp file and an atomic rename. A missing file reads as an
/// empty store; an unparseable file is a [`StoreError::Corrupt`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens a store backed by the document at `path`.
    ///
    /// The file is created lazily on the first commit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// The backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(&self) -> StoreResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(err) => return Err(err.into()),
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
                path: self.path.display().to_string(),
                reason: err.to_string(),
            })?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    fn persist_document(&self, document: &Map<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let rendered = serde_json::to_string_pretty(&Value::Object(document.clone()))
            .map_err(|source| StoreError::Encode {
                collection: "document",
                source,
            })?;

        fs::write(&tmp_path, rendered)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl Storage for JsonFileStore {
    fn read(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let document = self.load_document()?;

        match document.get(collection.name()) {
            None => Ok(Vec::new()),
            Some(Value::Array(values)) => Ok(values.clone()),
            Some(other) => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                reason: format!(
                    "collection '{}' is {}, expected an array",
                    collection.name(),
                    json_kind(other)
                ),
            }),
        }
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut document = self.load_document()?;

        for (collection, values) in batch.entries {
            debug!(collection = %collection, records = values.len(), "Committing collection");
            document.insert(collection.name().to_string(), Value::Array(values));
        }

        self.persist_document(&document)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_lazy_init() {
        let store = MemoryStore::new();
        assert!(store.read(Collection::Products).unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_commit_replaces() {
        let store = MemoryStore::new();
        let batch = WriteBatch::new()
            .put(Collection::Products, &[json!({"id": 1})])
            .unwrap();
        store.commit(batch).unwrap();

        let batch = WriteBatch::new()
            .put(Collection::Products, &[json!({"id": 2})])
            .unwrap();
        store.commit(batch).unwrap();

        let values = store.read(Collection::Products).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["id"], 2);
    }

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let batch = WriteBatch::new()
            .put(Collection::Products, &[json!({"id": 1})])
            .unwrap();
        store.commit(batch).unwrap();

        // Poison the mutex by panicking while holding it
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.collections.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert_eq!(store.read(Collection::Products).unwrap().len(), 1);
        let batch = WriteBatch::new()
            .put(Collection::Customers, &[json!({"id": 101})])
            .unwrap();
        store.commit(batch).unwrap();
        assert_eq!(store.read(Collection::Customers).unwrap().len(), 1);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("warung.json"));
        assert!(store.read(Collection::Customers).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_batch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warung.json");

        let store = JsonFileStore::new(&path);
        let batch = WriteBatch::new()
            .put(Collection::Products, &[json!({"id": 1, "name": "Kopi"})])
            .unwrap()
            .put(Collection::Customers, &[json!({"id": 101})])
            .unwrap();
        store.commit(batch).unwrap();

        // Re-open from disk and see both collections together
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.read(Collection::Products).unwrap().len(), 1);
        assert_eq!(reopened.read(Collection::Customers).unwrap().len(), 1);
        assert!(reopened.read(Collection::Transactions).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_commit_preserves_other_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("warung.json"));

        let batch = WriteBatch::new()
            .put(Collection::Products, &[json!({"id": 1})])
            .unwrap();
        store.commit(batch).unwrap();

        let batch = WriteBatch::new()
            .put(Collection::Customers, &[json!({"id": 101})])
            .unwrap();
        store.commit(batch).unwrap();

        assert_eq!(store.read(Collection::Products).unwrap().len(), 1);
        assert_eq!(store.read(Collection::Customers).unwrap().len(), 1);
    }

    #[test]
    fn test_file_store_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warung.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.read(Collection::Products),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_file_store_non_array_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warung.json");
        fs::write(&path, r#"{"products": 42}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.read(Collection::Products),
            Err(StoreError::Corrupt { .. })
        ));
    }
}

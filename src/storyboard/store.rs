//! Storyboard persistence behind a single well-known storage key.
//!
//! - `StoryboardStore`: load/save the whole collection
//! - `MemoryStore`: in-memory substitute (tests, browser bindings)
//! - `JsonFileStore`: one JSON file per key on local disk
//!
//! Loading never fails: absent data is an empty collection and unreadable
//! data (invalid JSON, or not an array) is logged and treated the same way.
//! Records of any other shape are kept as `StoredEntry::Foreign`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StoreResult;
use crate::storyboard::model::StoredEntry;

/// Durable slot holding the ordered storyboard collection.
pub trait StoryboardStore {
    /// Returns the persisted collection, or an empty one if absent or unreadable.
    fn load(&self) -> Vec<StoredEntry>;

    /// Replaces the persisted collection. On error the previous contents remain.
    fn save(&mut self, collection: &[StoredEntry]) -> StoreResult<()>;
}

impl<S: StoryboardStore + ?Sized> StoryboardStore for Box<S> {
    fn load(&self) -> Vec<StoredEntry> {
        (**self).load()
    }

    fn save(&mut self, collection: &[StoredEntry]) -> StoreResult<()> {
        (**self).save(collection)
    }
}

// =============================================================================
// JSON CODEC
// =============================================================================

/// Encodes a collection as the textual storage representation.
pub fn encode_collection(collection: &[StoredEntry]) -> StoreResult<String> {
    Ok(serde_json::to_string(collection)?)
}

/// Decodes the textual storage representation. Invalid JSON or a non-array
/// yields an empty collection; every array element is kept.
pub fn decode_collection(data: &str) -> Vec<StoredEntry> {
    if data.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(data) {
        Ok(collection) => collection,
        Err(e) => {
            warn!(error = %e, "stored storyboards unreadable; treating as empty");
            Vec::new()
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory store. Also the substitute used to test read-modify-write sequences.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing collection.
    pub fn with_entries(entries: Vec<StoredEntry>) -> Self {
        Self { entries }
    }

    /// Seeds the store from its textual representation (lenient, like `load`).
    pub fn from_json(data: &str) -> Self {
        Self::with_entries(decode_collection(data))
    }

    pub fn to_json(&self) -> StoreResult<String> {
        encode_collection(&self.entries)
    }

    pub fn entries(&self) -> &[StoredEntry] {
        &self.entries
    }
}

impl StoryboardStore for MemoryStore {
    fn load(&self) -> Vec<StoredEntry> {
        self.entries.clone()
    }

    fn save(&mut self, collection: &[StoredEntry]) -> StoreResult<()> {
        self.entries = collection.to_vec();
        Ok(())
    }
}

// =============================================================================
// JSON FILE STORE
// =============================================================================

/// Stores the collection as JSON text in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoryboardStore for JsonFileStore {
    fn load(&self) -> Vec<StoredEntry> {
        match fs::read_to_string(&self.path) {
            Ok(data) => decode_collection(&data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read storyboards");
                Vec::new()
            }
        }
    }

    fn save(&mut self, collection: &[StoredEntry]) -> StoreResult<()> {
        let data = encode_collection(collection)?;
        write_atomic(&self.path, data.as_bytes())?;
        info!(path = %self.path.display(), storyboards = collection.len(), "saved storyboards");
        Ok(())
    }
}

/// Writes `bytes` to a sibling temp file, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

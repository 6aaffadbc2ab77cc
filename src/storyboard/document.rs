//! Automerge-backed storyboard store.
//!
//! The collection is kept as a `StoryboardCollection` document root. Saving
//! reconciles into the document already on disk, so earlier changes stay in
//! its history and the file can still be merged with other replicas.
//! Storyboard entries are Automerge maps; entries from other producers are
//! kept as JSON text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use automerge::{AutoCommit, ChangeHash};
use autosurgeon::{hydrate, reconcile};
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::storyboard::model::{StoredEntry, StoryboardCollection};
use crate::storyboard::store::{write_atomic, StoryboardStore};

/// Stores the collection as a binary Automerge document in a single file.
#[derive(Debug, Clone)]
pub struct AutomergeStore {
    path: PathBuf,
}

impl AutomergeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document on disk, or `None` if the file does not exist.
    fn read_doc(&self) -> StoreResult<Option<AutoCommit>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(AutoCommit::load(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Current heads of the document on disk; empty if nothing was saved yet.
    pub fn heads(&self) -> StoreResult<Vec<ChangeHash>> {
        Ok(self
            .read_doc()?
            .map(|mut doc| doc.get_heads())
            .unwrap_or_default())
    }
}

impl StoryboardStore for AutomergeStore {
    fn load(&self) -> Vec<StoredEntry> {
        let doc = match self.read_doc() {
            Ok(Some(doc)) => doc,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read storyboard document");
                return Vec::new();
            }
        };
        match hydrate::<_, StoryboardCollection>(&doc) {
            Ok(collection) => collection.storyboards,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storyboard document unreadable; treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, collection: &[StoredEntry]) -> StoreResult<()> {
        // A corrupt document is replaced, matching `load` treating it as empty.
        let mut doc = match self.read_doc() {
            Ok(Some(doc)) => doc,
            Ok(None) => AutoCommit::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "replacing unreadable storyboard document");
                AutoCommit::new()
            }
        };

        let root = StoryboardCollection::new(collection.to_vec());
        reconcile(&mut doc, &root)?;
        write_atomic(&self.path, &doc.save())?;

        info!(path = %self.path.display(), storyboards = collection.len(), "saved storyboard document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyboard::model::{storyboards_of, Scene, Storyboard};
    use serde_json::json;
    use tempfile::tempdir;

    fn board(id: &str, vo: &str) -> StoredEntry {
        Storyboard::new(id, "Created via script")
            .with_scene(Scene::new(format!("{}-1", id), 1).with_vo_script(vo).with_notes("Pan"))
            .with_scene(Scene::new(format!("{}-2", id), 2))
            .with_last_edited("2024-01-01T00:00:00.000Z")
            .into()
    }

    #[test]
    fn test_missing_document_is_empty() {
        let dir = tempdir().unwrap();
        let store = AutomergeStore::new(dir.path().join("storyboards.automerge"));
        assert!(store.load().is_empty());
        assert!(store.heads().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storyboards.automerge");
        let mut store = AutomergeStore::new(&path);

        let collection = vec![board("2", "Second"), board("1", "First")];
        store.save(&collection).unwrap();

        let loaded = AutomergeStore::new(&path).load();
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_saves_advance_heads() {
        let dir = tempdir().unwrap();
        let mut store = AutomergeStore::new(dir.path().join("storyboards.automerge"));

        store.save(&[board("1", "First")]).unwrap();
        let after_first = store.heads().unwrap();
        assert!(!after_first.is_empty());

        store.save(&[board("2", "Second"), board("1", "First")]).unwrap();
        assert_ne!(store.heads().unwrap(), after_first);
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_corrupt_document_is_empty_and_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storyboards.automerge");
        fs::write(&path, b"not an automerge document").unwrap();

        let mut store = AutomergeStore::new(&path);
        assert!(store.load().is_empty());

        store.save(&[board("1", "Fresh")]).unwrap();
        assert_eq!(storyboards_of(&store.load())[0].scenes[0].vo_script, "Fresh");
    }

    #[test]
    fn test_other_producers_data_survives() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storyboards.automerge");
        let tagged: StoredEntry = serde_json::from_value(json!({
            "id": "2",
            "title": "Edited elsewhere",
            "scenes": [{"id": "2-1", "number": 1, "voScript": "", "files": [], "notes": "", "duration": 4}],
            "lastEdited": "2024-01-01T00:00:00.000Z",
            "folder": "Pilot"
        }))
        .unwrap();
        let foreign = StoredEntry::Foreign(json!({"id": 1700000000000u64, "title": "Older"}));
        let collection = vec![board("3", "New"), tagged, foreign];

        AutomergeStore::new(&path).save(&collection).unwrap();

        let loaded = AutomergeStore::new(&path).load();
        assert_eq!(loaded, collection);
        assert_eq!(loaded[1].as_storyboard().unwrap().extra.get("folder"), Some(&json!("Pilot")));
    }
}

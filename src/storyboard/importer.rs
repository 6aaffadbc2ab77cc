//! Script import: parse, prepend to the stored collection, write back.
//!
//! The stored collection is an explicit value: it is loaded, transformed by
//! `prepend_storyboard`, and saved. Nothing is written unless the parse
//! succeeded, and a failed write leaves the previous collection in place.

use std::fmt;

use tracing::{error, info};

use crate::error::{ScriptError, ScriptResult};
use crate::storyboard::model::{storyboards_of, Storyboard, StoredEntry};
use crate::storyboard::parser::{trim_text, SceneParser};
use crate::storyboard::store::StoryboardStore;

/// Status shown when the user submits blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please paste your structured script data before creating.";

/// Puts `storyboard` at the front of `collection` (newest first). Existing
/// entries, including ones from other producers, keep their order.
pub fn prepend_storyboard(mut collection: Vec<StoredEntry>, storyboard: Storyboard) -> Vec<StoredEntry> {
    collection.insert(0, storyboard.into());
    collection
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub storyboard_id: String,
    pub scene_count: usize,
}

/// User-facing status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportStatus {
    /// Nothing to report (initial state, or cleared by an input change)
    #[default]
    Idle,
    Success { scenes: usize },
    Error(String),
}

impl ImportStatus {
    pub fn from_error(err: &ScriptError) -> Self {
        Self::Error(format!("Error: {}", err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Success { scenes } => format!("Successfully created {} scenes!", scenes),
            Self::Error(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Runs the import workflow against a store.
///
/// `&mut self` on every mutating call gives the read-modify-write sequence
/// exclusive access to the store.
pub struct ScriptImporter<S: StoryboardStore> {
    store: S,
    parser: SceneParser,
    status: ImportStatus,
}

impl<S: StoryboardStore> ScriptImporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: SceneParser::new(),
            status: ImportStatus::Idle,
        }
    }

    /// Builder: Use a custom parser (e.g. a different title).
    pub fn with_parser(mut self, parser: SceneParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current stored collection, every entry included.
    pub fn entries(&self) -> Vec<StoredEntry> {
        self.store.load()
    }

    /// Stored entries with the storyboard shape, newest first.
    pub fn storyboards(&self) -> Vec<Storyboard> {
        storyboards_of(&self.store.load())
    }

    /// Parses `text` and persists the new storyboard at the front of the collection.
    pub fn import(&mut self, text: &str) -> ScriptResult<ImportOutcome> {
        self.import_optional(Some(text))
    }

    /// As `import`, for input that may be absent.
    pub fn import_optional(&mut self, text: Option<&str>) -> ScriptResult<ImportOutcome> {
        let storyboard = self.parser.parse_optional(text)?;
        let outcome = ImportOutcome {
            storyboard_id: storyboard.id.clone(),
            scene_count: storyboard.scene_count(),
        };

        let collection = prepend_storyboard(self.store.load(), storyboard);
        self.store.save(&collection)?;

        info!(
            storyboard = %outcome.storyboard_id,
            scenes = outcome.scene_count,
            total = collection.len(),
            "imported script"
        );
        Ok(outcome)
    }

    /// The user-facing action: validates input, imports, records the status.
    pub fn submit(&mut self, text: Option<&str>) -> &ImportStatus {
        self.status = match text {
            Some(t) if trim_text(t).is_empty() => ImportStatus::Error(EMPTY_INPUT_MESSAGE.to_string()),
            _ => match self.import_optional(text) {
                Ok(outcome) => ImportStatus::Success {
                    scenes: outcome.scene_count,
                },
                Err(e) => {
                    error!(error = %e, "script import failed");
                    ImportStatus::from_error(&e)
                }
            },
        };
        &self.status
    }

    pub fn status(&self) -> &ImportStatus {
        &self.status
    }

    /// Clears the status line (input changed).
    pub fn clear_status(&mut self) {
        self.status = ImportStatus::Idle;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::storyboard::store::MemoryStore;

    /// Store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl StoryboardStore for ReadOnlyStore {
        fn load(&self) -> Vec<StoredEntry> {
            self.inner.load()
        }

        fn save(&mut self, _collection: &[StoredEntry]) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }
    }

    const SCRIPT: &str = "Script Segment: \"Welcome home.\"\nCamera pans left.\n---\nThe hero arrives.";

    #[test]
    fn test_prepend_storyboard() {
        let collection = vec![Storyboard::new("1", "a").into(), Storyboard::new("2", "b").into()];
        let result = prepend_storyboard(collection, Storyboard::new("3", "c"));
        let ids: Vec<String> = storyboards_of(&result).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_import_prepends_newest_first() {
        let existing = Storyboard::new("old", "Earlier");
        let mut importer = ScriptImporter::new(MemoryStore::with_entries(vec![existing.into()]));

        let outcome = importer.import(SCRIPT).unwrap();
        assert_eq!(outcome.scene_count, 2);

        let stored = importer.storyboards();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, outcome.storyboard_id);
        assert_eq!(stored[0].scenes[0].vo_script, "Welcome home.");
        assert_eq!(stored[1].id, "old");
    }

    #[test]
    fn test_parse_failure_leaves_store_untouched() {
        let mut importer = ScriptImporter::new(MemoryStore::new());

        assert_eq!(importer.import("---\n---"), Err(ScriptError::NoScenesFound));
        assert_eq!(importer.import(""), Err(ScriptError::InvalidInput));
        assert_eq!(importer.import_optional(None), Err(ScriptError::InvalidInput));
        assert!(importer.store().entries().is_empty());
    }

    #[test]
    fn test_save_failure_is_persistence_error() {
        let existing = Storyboard::new("old", "Earlier");
        let mut importer = ScriptImporter::new(ReadOnlyStore {
            inner: MemoryStore::with_entries(vec![existing.into()]),
        });

        let err = importer.import(SCRIPT).unwrap_err();
        assert!(matches!(err, ScriptError::Persistence(ref m) if m.contains("quota exceeded")));
        assert_eq!(importer.storyboards().len(), 1);
    }

    #[test]
    fn test_submit_success_status() {
        let mut importer = ScriptImporter::new(MemoryStore::new());
        let status = importer.submit(Some(SCRIPT)).clone();

        assert_eq!(status, ImportStatus::Success { scenes: 2 });
        assert_eq!(status.message(), "Successfully created 2 scenes!");
        assert!(!status.is_error());
    }

    #[test]
    fn test_submit_blank_input_is_rejected_before_parsing() {
        let mut importer = ScriptImporter::new(MemoryStore::new());

        let status = importer.submit(Some("   \n ")).clone();
        assert!(status.is_error());
        assert_eq!(status.message(), EMPTY_INPUT_MESSAGE);
        assert_eq!(importer.submit(Some("\u{FEFF}\n")).message(), EMPTY_INPUT_MESSAGE);
        assert!(importer.storyboards().is_empty());
    }

    #[test]
    fn test_submit_error_statuses() {
        let mut importer = ScriptImporter::new(MemoryStore::new());
        assert_eq!(
            importer.submit(None).message(),
            "Error: Invalid input: text must be a non-empty string"
        );
        assert!(importer.submit(Some("---")).message().starts_with("Error: No valid scene blocks"));

        let mut failing = ScriptImporter::new(ReadOnlyStore::default());
        assert!(failing
            .submit(Some(SCRIPT))
            .message()
            .starts_with("Error: Failed to save the storyboard"));
    }

    #[test]
    fn test_clear_status() {
        let mut importer = ScriptImporter::new(MemoryStore::new());
        importer.submit(Some("Scene"));
        assert_ne!(importer.status(), &ImportStatus::Idle);

        importer.clear_status();
        assert_eq!(importer.status(), &ImportStatus::Idle);
        assert_eq!(importer.status().to_string(), "");
    }

    #[test]
    fn test_custom_parser_title() {
        let mut importer =
            ScriptImporter::new(MemoryStore::new()).with_parser(SceneParser::new().with_title("Pilot"));
        importer.import("Scene").unwrap();
        assert_eq!(storyboards_of(importer.into_store().entries())[0].title, "Pilot");
    }

    #[test]
    fn test_import_keeps_records_from_other_producers() {
        let existing = r#"[{"id":1700000000000,"title":"Older","scenes":[],"lastEdited":"2023-11-14T22:13:20.000Z"},{"id":"2","title":"Kept?","scenes":[{"id":"2-1","number":1,"voScript":"","files":[],"notes":"","duration":4}],"lastEdited":"2024-01-01T00:00:00.000Z","folder":"Pilot"}]"#;
        let mut importer = ScriptImporter::new(MemoryStore::from_json(existing));

        let outcome = importer.import("Scene").unwrap();

        let entries = importer.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_storyboard().unwrap().id, outcome.storyboard_id);
        assert!(entries[1].is_foreign());
        assert_eq!(entries[2].as_storyboard().unwrap().title, "Kept?");

        let saved = importer.store().to_json().unwrap();
        assert!(saved.ends_with(&existing[1..]));
    }
}

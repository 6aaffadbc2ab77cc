//! Data models for script-originated storyboards.
//!
//! Field names serialize in camelCase so the persisted collection keeps the
//! `voScript` / `lastEdited` shape shared with other storyboard producers.
//! Autosurgeon derives let the same structs live in an Automerge document.
//!
//! The storage key is shared with other storyboard producers. Records are
//! carried losslessly: unknown fields ride along in `ExtraFields`, and a
//! record that does not fit `Storyboard` at all is kept verbatim as
//! `StoredEntry::Foreign`.

use automerge::ObjId;
use autosurgeon::reconcile::NoKey;
use autosurgeon::{Hydrate, HydrateError, ReadDoc, Reconcile, Reconciler};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title given to storyboards created from a pasted script.
pub const DEFAULT_TITLE: &str = "Created via script";

// =============================================================================
// COLLECTION ROOT
// =============================================================================

/// Root document for the Automerge store: the ordered storyboard collection.
/// Newest storyboard first.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct StoryboardCollection {
    pub storyboards: Vec<StoredEntry>,
}

impl StoryboardCollection {
    /// Wraps an existing ordered collection.
    pub fn new(storyboards: Vec<StoredEntry>) -> Self {
        Self { storyboards }
    }
}

/// One record of the persisted collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredEntry {
    /// A record with the storyboard shape
    Storyboard(Storyboard),
    /// Any other JSON value, kept as written
    Foreign(Value),
}

impl StoredEntry {
    pub fn as_storyboard(&self) -> Option<&Storyboard> {
        match self {
            Self::Storyboard(board) => Some(board),
            Self::Foreign(_) => None,
        }
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign(_))
    }
}

impl From<Storyboard> for StoredEntry {
    fn from(board: Storyboard) -> Self {
        Self::Storyboard(board)
    }
}

/// Typed view of a collection: the entries with the storyboard shape, in order.
pub fn storyboards_of(entries: &[StoredEntry]) -> Vec<Storyboard> {
    entries
        .iter()
        .filter_map(StoredEntry::as_storyboard)
        .cloned()
        .collect()
}

// Typed entries become Automerge maps; foreign ones are stored as JSON text.
impl Reconcile for StoredEntry {
    type Key<'a> = NoKey;

    fn reconcile<R: Reconciler>(&self, reconciler: R) -> Result<(), R::Error> {
        match self {
            Self::Storyboard(board) => board.reconcile(reconciler),
            Self::Foreign(value) => value.to_string().reconcile(reconciler),
        }
    }
}

impl Hydrate for StoredEntry {
    fn hydrate_map<D: ReadDoc>(doc: &D, obj: &ObjId) -> Result<Self, HydrateError> {
        Storyboard::hydrate_map(doc, obj).map(Self::Storyboard)
    }

    fn hydrate_string(text: &'_ str) -> Result<Self, HydrateError> {
        let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Ok(Self::Foreign(value))
    }
}

// =============================================================================
// EXTRA FIELDS
// =============================================================================

/// Fields written by other producers that this crate does not interpret.
/// Serialized inline (flattened); stored as JSON text in Automerge documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExtraFields(pub Map<String, Value>);

impl ExtraFields {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Reconcile for ExtraFields {
    type Key<'a> = NoKey;

    fn reconcile<R: Reconciler>(&self, reconciler: R) -> Result<(), R::Error> {
        Value::Object(self.0.clone()).to_string().reconcile(reconciler)
    }
}

impl Hydrate for ExtraFields {
    fn hydrate_string(text: &'_ str) -> Result<Self, HydrateError> {
        Ok(Self(serde_json::from_str(text).unwrap_or_default()))
    }
}

// =============================================================================
// STORYBOARD
// =============================================================================

/// A titled, ordered collection of scenes. The unit of persistence.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Storyboard {
    /// Unique identifier (creation time in ms, strictly increasing per process)
    pub id: String,
    /// Display title
    pub title: String,
    /// Scenes in order; index + 1 == scene number
    pub scenes: Vec<Scene>,
    /// ISO-8601 timestamp of creation or last mutation
    pub last_edited: String,
    /// Fields owned by other producers
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Storyboard {
    /// Creates an empty storyboard with the given ID and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder: Set title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: Append a scene.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Builder: Set the last-edited timestamp.
    pub fn with_last_edited(mut self, timestamp: impl Into<String>) -> Self {
        self.last_edited = timestamp.into();
        self
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Looks up a scene by its 1-based number.
    pub fn scene(&self, number: u32) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.number == number)
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// One segment of a script: voice-over text plus free-form notes.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique within the owning storyboard
    pub id: String,
    /// 1-based position
    pub number: u32,
    /// Voice-over text, possibly empty
    pub vo_script: String,
    /// Attached files; never populated by the script parser
    pub files: Vec<FileRef>,
    /// Free-form notes, may contain blank-line paragraph breaks
    pub notes: String,
    /// Fields owned by other producers
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Scene {
    /// Creates a new Scene with the given ID and scene number.
    pub fn new(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number,
            ..Default::default()
        }
    }

    /// Builder: Set voice-over text.
    pub fn with_vo_script(mut self, vo_script: impl Into<String>) -> Self {
        self.vo_script = vo_script.into();
        self
    }

    /// Builder: Set notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builder: Attach a file reference.
    pub fn with_file(mut self, file: FileRef) -> Self {
        self.files.push(file);
        self
    }
}

/// File attached to a scene by another storyboard producer.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub file_type: String,
    /// Data URL or URL
    pub url: String,
    /// Fields owned by other producers
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl FileRef {
    pub fn new(name: impl Into<String>, file_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type: file_type.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

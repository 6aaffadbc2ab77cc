//! Scriptboard - break structured scripts into storyboard scenes.
//!
//! A pasted script is split into scene blocks on `---` lines. Each block's
//! `Script Segment:` line becomes the scene's voice-over text and every other
//! line becomes notes. The resulting storyboard is prepended to a collection
//! kept under a single storage key:
//!
//! - **Pure parsing**: `SceneParser` performs no I/O
//! - **Pluggable storage**: JSON file, Automerge document, or in-memory
//! - **Explicit state**: the collection is loaded, transformed, and saved as a value
//!
//! # Example
//!
//! ```rust
//! use scriptboard::{MemoryStore, ScriptImporter};
//!
//! let script = "Script Segment: \"Welcome home.\"\nCamera pans left.\n---\nThe hero arrives.";
//!
//! let mut importer = ScriptImporter::new(MemoryStore::new());
//! let outcome = importer.import(script).unwrap();
//! assert_eq!(outcome.scene_count, 2);
//!
//! let stored = importer.storyboards();
//! assert_eq!(stored[0].scenes[0].vo_script, "Welcome home.");
//! assert_eq!(stored[0].scenes[1].notes, "The hero arrives.");
//! ```

pub mod config;
pub mod error;
pub mod storyboard;

// Re-exports for convenience
pub use config::{StoreBackend, StoreConfig};
pub use error::{ScriptError, ScriptResult, StoreError, StoreResult};
pub use storyboard::{
    parse_script, AutomergeStore, ImportOutcome, ImportStatus, JsonFileStore, MemoryStore, Scene,
    SceneParser, ScriptImporter, StoredEntry, Storyboard, StoryboardStore,
};

#[cfg(feature = "wasm")]
pub use storyboard::wasm::JsScriptImporter;

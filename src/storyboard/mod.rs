//! Script-originated storyboards.
//!
//! This module provides:
//! - `model`: Data structures (Storyboard, Scene, FileRef)
//! - `parser`: SceneParser, splitting script text into scenes
//! - `store`: StoryboardStore trait with memory and JSON file backends
//! - `document`: Automerge-backed store
//! - `importer`: ScriptImporter, the parse → prepend → save workflow
//! - `wasm`: WASM bindings for browser usage (JsScriptImporter)

pub mod document;
pub mod ids;
pub mod importer;
pub mod model;
pub mod parser;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::AutomergeStore;
pub use importer::{prepend_storyboard, ImportOutcome, ImportStatus, ScriptImporter};
pub use model::*;
pub use parser::{parse_script, SceneParser};
pub use store::{JsonFileStore, MemoryStore, StoryboardStore};

#[cfg(feature = "wasm")]
pub use wasm::JsScriptImporter;

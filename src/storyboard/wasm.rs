//! WASM bindings for script import.
//!
//! The browser owns the storage slot: JS reads the stored collection, hands
//! it to `JsScriptImporter`, and writes `toJson()` back after a successful
//! submit.
//!
//! ```js
//! const importer = new JsScriptImporter(localStorage.getItem('storyboards'));
//! const message = importer.submit(scriptInput.value);
//! if (!importer.statusIsError()) {
//!   localStorage.setItem('storyboards', importer.toJson());
//! }
//! ```

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::error::{ScriptError, StoreError};
use crate::storyboard::importer::ScriptImporter;
use crate::storyboard::parser::SceneParser;
use crate::storyboard::store::MemoryStore;

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr, $err:ty) => {
        $expr.map_err(|e: $err| JsValue::from_str(&e.to_string()))
    };
}

/// Parses script text into a storyboard object without storing it.
///
/// Throws the error message for absent/empty input or when no scenes are found.
#[wasm_bindgen(js_name = parseScript)]
pub fn parse_script(text: JsValue) -> Result<JsValue, JsValue> {
    let board = js_result!(SceneParser::new().parse_optional(text.as_string().as_deref()), ScriptError)?;
    Ok(to_js_value(&board)?)
}

/// JavaScript-friendly wrapper around `ScriptImporter` over an in-memory collection.
#[wasm_bindgen]
pub struct JsScriptImporter {
    inner: ScriptImporter<MemoryStore>,
}

#[wasm_bindgen]
impl JsScriptImporter {
    /// Creates an importer seeded with the stored collection JSON (null or
    /// corrupt data starts an empty collection).
    #[wasm_bindgen(constructor)]
    pub fn new(stored: Option<String>) -> JsScriptImporter {
        let store = stored
            .as_deref()
            .map(MemoryStore::from_json)
            .unwrap_or_default();
        JsScriptImporter {
            inner: ScriptImporter::new(store),
        }
    }

    /// Runs the import for the current input and returns the status message.
    pub fn submit(&mut self, text: JsValue) -> String {
        let text = text.as_string();
        self.inner.submit(text.as_deref()).message()
    }

    /// Whether the last submit failed.
    #[wasm_bindgen(js_name = statusIsError)]
    pub fn status_is_error(&self) -> bool {
        self.inner.status().is_error()
    }

    /// Clears the status message (call on input change).
    #[wasm_bindgen(js_name = clearStatus)]
    pub fn clear_status(&mut self) {
        self.inner.clear_status();
    }

    /// The collection as JSON text, ready to write back to browser storage.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        js_result!(self.inner.store().to_json(), StoreError)
    }

    /// The collection as an array of objects, entries from other producers included.
    pub fn storyboards(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.store().entries())?)
    }
}

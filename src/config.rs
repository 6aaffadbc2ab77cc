//! Storage configuration: where the storyboard collection lives and in which format.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::storyboard::document::AutomergeStore;
use crate::storyboard::store::{JsonFileStore, StoryboardStore};

/// Well-known key the collection is stored under.
pub const DEFAULT_STORE_KEY: &str = "storyboards";

/// On-disk format of the storage slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum StoreBackend {
    /// JSON text, one file per key
    #[default]
    Json,
    /// Binary Automerge document, one file per key
    Automerge,
}

impl StoreBackend {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Automerge => "automerge",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "automerge" => Ok(Self::Automerge),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// Location and format of the storyboard store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub key: String,
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            key: DEFAULT_STORE_KEY.to_string(),
            backend: StoreBackend::default(),
        }
    }
}

impl StoreConfig {
    /// Creates a config rooted at `dir` with the default key and backend.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Builder: Set storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Builder: Set backend.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// File backing the storage slot: `<dir>/<key>.<ext>`.
    pub fn path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.key, self.backend.extension()))
    }

    /// Opens the configured store.
    pub fn open(&self) -> Box<dyn StoryboardStore> {
        match self.backend {
            StoreBackend::Json => Box::new(JsonFileStore::new(self.path())),
            StoreBackend::Automerge => Box::new(AutomergeStore::new(self.path())),
        }
    }
}
